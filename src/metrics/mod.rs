//! Prometheus metrics for evaluation runs.
//!
//! The worker is a batch process, so the registry is rendered to a text file
//! at the end of a run instead of being scraped.

use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};
use std::path::Path;

pub struct Metrics {
    registry: Registry,
    pub symbols_evaluated_total: Counter,
    pub symbol_failures_total: CounterVec,
    pub signals_generated_total: CounterVec,
    pub alerts_emitted_total: Counter,
    pub last_run_duration_seconds: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let symbols_evaluated_total = Counter::with_opts(Opts::new(
            "symbols_evaluated_total",
            "Symbols successfully classified",
        ))?;
        let symbol_failures_total = CounterVec::new(
            Opts::new("symbol_failures_total", "Symbols that failed evaluation"),
            &["reason"],
        )?;
        let signals_generated_total = CounterVec::new(
            Opts::new("signals_generated_total", "Classified signals by kind"),
            &["kind"],
        )?;
        let alerts_emitted_total =
            Counter::with_opts(Opts::new("alerts_emitted_total", "Alerts handed to the sink"))?;
        let last_run_duration_seconds = Gauge::with_opts(Opts::new(
            "last_run_duration_seconds",
            "Wall time of the most recent batch run",
        ))?;

        registry.register(Box::new(symbols_evaluated_total.clone()))?;
        registry.register(Box::new(symbol_failures_total.clone()))?;
        registry.register(Box::new(signals_generated_total.clone()))?;
        registry.register(Box::new(alerts_emitted_total.clone()))?;
        registry.register(Box::new(last_run_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            symbols_evaluated_total,
            symbol_failures_total,
            signals_generated_total,
            alerts_emitted_total,
            last_run_duration_seconds,
        })
    }

    /// Prometheus text exposition of every registered metric.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub async fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let text = self.render().map_err(|e| std::io::Error::other(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, text).await
    }
}
