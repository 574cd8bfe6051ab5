//! Job context for dependency injection

use crate::config::Config;
use crate::db::SignalLog;
use crate::metrics::Metrics;
use crate::notify::AlertSink;
use crate::services::market_data::PriceHistorySource;
use std::sync::Arc;

/// Shared, read-only dependencies of every evaluation job.
///
/// The signal log and metrics are optional; jobs skip them when absent.
pub struct JobContext {
    pub config: Arc<Config>,
    pub data_provider: Arc<dyn PriceHistorySource + Send + Sync>,
    pub sink: Arc<dyn AlertSink + Send + Sync>,
    pub signal_log: Option<Arc<SignalLog>>,
    pub metrics: Option<Arc<Metrics>>,
}

impl JobContext {
    pub fn new(
        config: Arc<Config>,
        data_provider: Arc<dyn PriceHistorySource + Send + Sync>,
        sink: Arc<dyn AlertSink + Send + Sync>,
    ) -> Self {
        Self {
            config,
            data_provider,
            sink,
            signal_log: None,
            metrics: None,
        }
    }

    pub fn with_signal_log(mut self, signal_log: Arc<SignalLog>) -> Self {
        self.signal_log = Some(signal_log);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}
