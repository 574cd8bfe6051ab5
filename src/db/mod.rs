//! Signal persistence

pub mod signal_log;

pub use signal_log::{SignalLog, SignalLogError};
