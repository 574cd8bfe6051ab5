//! Alert rendering, filtering and delivery.

pub mod format;
pub mod rsi_report;
pub mod sink;

pub use format::render;
pub use rsi_report::{RsiReport, RsiStatus};
pub use sink::{Alert, AlertSink, MemorySink, StdoutSink};

use crate::config::AlertConfig;
use crate::models::{SignalKind, SignalRecord};

/// NEUTRAL is never alerted; with `send_only_strong` only STRONG_* are.
pub fn should_alert(record: &SignalRecord, config: &AlertConfig) -> bool {
    match record.signal_kind {
        SignalKind::Neutral => false,
        kind if config.send_only_strong => kind.is_strong(),
        _ => true,
    }
}
