//! Integration tests for the batch worker
//!
//! Runs the runtime over several symbols and checks isolation, alerting and
//! metrics.

use crate::test_utils::{day, history_from_closes, scratch_dir, wave_closes, TestWorker};
use signalwatch::config::{Config, MessageFormat, SignalConfig};
use signalwatch::core::runtime::SignalRuntime;
use signalwatch::db::SignalLog;
use signalwatch::indicators::compute_indicators;
use signalwatch::indicators::momentum::CrossoverType;
use signalwatch::jobs::{handle_evaluate_symbol, EvaluateSymbolJob, JobContext, JobError};
use signalwatch::models::{PricePoint, SignalKind};
use signalwatch::notify::{MemorySink, StdoutSink};
use signalwatch::services::{CsvPriceSource, InMemoryPriceSource, PriceHistorySource, SourceError};
use signalwatch::signals::all_crossovers;
use std::sync::Arc;

/// Source that panics for one symbol and delegates the rest.
struct PanickingSource {
    panic_on: &'static str,
    inner: InMemoryPriceSource,
}

#[async_trait::async_trait]
impl PriceHistorySource for PanickingSource {
    async fn get_history(&self, symbol: &str) -> Result<Vec<PricePoint>, SourceError> {
        if symbol == self.panic_on {
            panic!("source blew up for {symbol}");
        }
        self.inner.get_history(symbol).await
    }
}

fn base_config(symbols: &[&str]) -> Config {
    Config {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        ..Config::default()
    }
}

/// First bullish crossover date in a 150-day wave.
fn bullish_date(history: &[PricePoint]) -> chrono::NaiveDate {
    let series = compute_indicators(history, &SignalConfig::default().indicators).unwrap();
    all_crossovers(history, &series)
        .into_iter()
        .find(|e| e.crossover == CrossoverType::Bullish)
        .map(|e| e.date)
        .unwrap()
}

#[tokio::test]
async fn worker_isolates_failing_symbols() {
    let mut broken = history_from_closes(&wave_closes(60));
    broken[10].date = broken[9].date;

    let source = InMemoryPriceSource::new()
        .with_history("GOOD", history_from_closes(&wave_closes(60)))
        .with_history("BROKEN", broken);
    let worker = TestWorker::new(base_config(&["GOOD", "BROKEN", "MISSING"]), source);

    let summary = SignalRuntime::new(worker.job_context.clone()).run().await;

    assert_eq!(summary.evaluated(), 1);
    assert!(summary.outcome_for("GOOD").is_some());
    let failed: Vec<&str> = summary.failures.iter().map(|f| f.symbol.as_str()).collect();
    assert_eq!(failed, vec!["BROKEN", "MISSING"]);

    let metrics = worker.metrics.render().unwrap();
    assert!(metrics.contains("symbols_evaluated_total 1"));
    assert!(metrics.contains("symbol_failures_total{reason=\"data_integrity\"} 1"));
    assert!(metrics.contains("symbol_failures_total{reason=\"not_found\"} 1"));
}

#[tokio::test]
async fn worker_reports_panicked_symbols() {
    let good = history_from_closes(&wave_closes(60));
    let source = PanickingSource {
        panic_on: "BOOM",
        inner: InMemoryPriceSource::new().with_history("GOOD", good),
    };
    let config = base_config(&["BOOM", "GOOD", "MISS"]);
    let worker = TestWorker::with_source(config, Arc::new(source));

    let summary = SignalRuntime::new(worker.job_context.clone()).run().await;

    assert_eq!(summary.evaluated(), 1);
    let failed: Vec<(&str, &str)> = summary
        .failures
        .iter()
        .map(|f| (f.symbol.as_str(), f.reason.as_str()))
        .collect();
    assert_eq!(failed.len(), 2);
    assert_eq!(failed[0], ("BOOM", "panicked"));
    assert_eq!(failed[1].0, "MISS");

    let metrics = worker.metrics.render().unwrap();
    assert!(metrics.contains("symbol_failures_total{reason=\"panic\"} 1"));
}

#[tokio::test]
async fn worker_alerts_on_actionable_signals_only() {
    let history = history_from_closes(&wave_closes(150));
    let as_of = bullish_date(&history);

    let mut config = base_config(&["WAVE"]);
    config.signal_date = Some(as_of);
    config.alerts.format = MessageFormat::Medium;
    let worker = TestWorker::new(config, InMemoryPriceSource::new().with_history("WAVE", history));

    let summary = SignalRuntime::new(worker.job_context.clone()).run().await;
    let outcome = summary.outcome_for("WAVE").unwrap();
    assert_eq!(outcome.record.date, as_of);
    let kind = outcome.record.signal_kind;
    assert!(kind.is_buy() || kind == SignalKind::Neutral);

    let alerts = worker.sink.alerts();
    let signal_alerts: Vec<_> = alerts.iter().filter(|a| a.symbol.is_some()).collect();
    if outcome.record.is_actionable() {
        assert!(outcome.alerted);
        assert_eq!(signal_alerts.len(), 1);
        assert!(signal_alerts[0].message.contains("<b>WAVE</b>"));
    } else {
        assert!(signal_alerts.is_empty());
    }
    assert!(outcome
        .recent_crossovers
        .iter()
        .any(|e| e.date == as_of && e.crossover == CrossoverType::Bullish));
}

#[tokio::test]
async fn worker_sends_rsi_report_for_portfolio() {
    let mut config = base_config(&["WAVE"]);
    config.portfolio = vec!["MINE".to_string()];
    let source = InMemoryPriceSource::new()
        .with_history("WAVE", history_from_closes(&wave_closes(60)))
        .with_history("MINE", history_from_closes(&wave_closes(45)));
    let worker = TestWorker::new(config, source);

    let summary = SignalRuntime::new(worker.job_context.clone()).run().await;
    assert_eq!(summary.evaluated(), 2);

    let report = summary.rsi_report.expect("portfolio symbol has an RSI");
    assert_eq!(report.portfolio.len(), 1);
    assert_eq!(report.portfolio[0].symbol, "MINE");

    let alerts = worker.sink.alerts();
    let report_alert = alerts.iter().find(|a| a.symbol.is_none()).unwrap();
    assert!(report_alert.message.contains("YOUR PORTFOLIO RSI STATUS"));
}

#[tokio::test]
async fn worker_concurrency_does_not_change_results() {
    let symbols: Vec<String> = (0..8).map(|i| format!("S{i}")).collect();
    let mut source = InMemoryPriceSource::new();
    for (i, symbol) in symbols.iter().enumerate() {
        source.insert(symbol.clone(), history_from_closes(&wave_closes(60 + i * 3)));
    }
    let config = Config {
        symbols: symbols.clone(),
        ..Config::default()
    };

    let serial = TestWorker::new(config.clone(), source.clone());
    let parallel = TestWorker::new(config, source);
    let a = SignalRuntime::new(serial.job_context.clone())
        .with_concurrency(1)
        .run()
        .await;
    let b = SignalRuntime::new(parallel.job_context.clone())
        .with_concurrency(8)
        .run()
        .await;

    assert_eq!(a.evaluated(), 8);
    for (x, y) in a.outcomes.iter().zip(&b.outcomes) {
        assert_eq!(x.record.symbol, y.record.symbol);
        assert_eq!(x.record.signal_kind, y.record.signal_kind);
        assert_eq!(x.record.stop_loss, y.record.stop_loss);
    }
}

#[tokio::test]
async fn handler_reports_source_errors() {
    let worker = TestWorker::new(base_config(&[]), InMemoryPriceSource::new());
    let job = EvaluateSymbolJob::new("NONE", false);
    let result = handle_evaluate_symbol(job, worker.job_context.clone()).await;
    match result {
        Err(e @ JobError::Source(_)) => assert_eq!(e.reason(), "not_found"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn worker_reads_csv_directory_and_logs_signals() {
    let dir = scratch_dir("csv-worker");
    let mut csv = String::from("published_date,open,high,low,close,traded_quantity\n");
    for (i, close) in wave_closes(70).iter().enumerate() {
        csv.push_str(&format!(
            "{},{close:.2},{:.2},{:.2},{close:.2},100\n",
            day(i),
            close * 1.01,
            close * 0.99
        ));
    }
    std::fs::write(dir.join("NABIL.csv"), csv).unwrap();

    let config = Config {
        data_dir: dir.clone(),
        symbols: vec!["NABIL".to_string()],
        ..Config::default()
    };
    let log = Arc::new(SignalLog::new(dir.join("history").join("signals.jsonl")));
    let sink = Arc::new(MemorySink::new());
    let ctx = JobContext::new(
        Arc::new(config.clone()),
        Arc::new(CsvPriceSource::new(&config.data_dir)),
        sink,
    )
    .with_signal_log(log.clone());

    let summary = SignalRuntime::new(Arc::new(ctx)).run().await;
    assert_eq!(summary.evaluated(), 1);

    let logged = log.read_all().await.unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].symbol, "NABIL");
    assert_eq!(logged[0].date, day(69));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn stdout_sink_accepts_alerts() {
    use signalwatch::notify::{Alert, AlertSink};
    StdoutSink.send(Alert::report("test report")).await.unwrap();
}
