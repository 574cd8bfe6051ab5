//! Signalwatch Worker
//!
//! Runs one evaluation pass over the configured stock list and exits.
//! Scheduling is left to whatever invokes the binary.

use dotenvy::dotenv;
use signalwatch::config::Config;
use signalwatch::core::runtime::SignalRuntime;
use signalwatch::db::SignalLog;
use signalwatch::jobs::context::JobContext;
use signalwatch::logging;
use signalwatch::metrics::Metrics;
use signalwatch::notify::{AlertSink, StdoutSink};
use signalwatch::services::{CsvPriceSource, PriceHistorySource};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(&config.environment);

    info!("Starting Signalwatch Worker");
    info!(environment = %config.environment, "Environment");
    info!(
        strategy = ?config.signal.strategy,
        format = ?config.alerts.format,
        strong_only = config.alerts.send_only_strong,
        as_of = ?config.signal_date,
        "Signal settings"
    );

    let symbols = config.all_symbols();
    if symbols.is_empty() {
        warn!("No symbols configured - set SYMBOLS, STOCK_LIST or PORTFOLIO_STOCKS");
        return Ok(());
    }
    info!(symbols = ?symbols, "Symbols: {}", symbols.join(", "));

    let metrics = Arc::new(Metrics::new()?);
    let data_provider: Arc<dyn PriceHistorySource + Send + Sync> =
        Arc::new(CsvPriceSource::new(&config.data_dir));
    let sink: Arc<dyn AlertSink + Send + Sync> = Arc::new(StdoutSink);

    let signal_log_path = config.signal_log_path.clone();
    let metrics_path = config.metrics_path.clone();

    let mut job_context =
        JobContext::new(Arc::new(config), data_provider, sink).with_metrics(metrics.clone());
    if let Some(path) = signal_log_path {
        info!(path = %path.display(), "Appending signals to history log");
        job_context = job_context.with_signal_log(Arc::new(SignalLog::new(path)));
    }

    let runtime = SignalRuntime::new(Arc::new(job_context));
    info!(concurrency = runtime.concurrency(), "Worker concurrency: {}", runtime.concurrency());
    let summary = runtime.run().await;

    for failure in &summary.failures {
        warn!(symbol = %failure.symbol, reason = %failure.reason, "Symbol skipped");
    }

    if let Some(path) = metrics_path {
        match metrics.write_to(&path).await {
            Ok(()) => info!(path = %path.display(), "Metrics written"),
            Err(e) => warn!(error = %e, path = %path.display(), "Failed to write metrics"),
        }
    }

    info!(
        evaluated = summary.evaluated(),
        failed = summary.failures.len(),
        alerts = summary.alerts_sent(),
        "Worker finished"
    );
    Ok(())
}
