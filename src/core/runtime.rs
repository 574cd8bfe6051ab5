//! Batch runtime for signal evaluation
//!
//! Every symbol runs as its own task; a semaphore bounds how many evaluate
//! at once. One symbol failing never stops the others.

use crate::config::Config;
use crate::jobs::context::JobContext;
use crate::jobs::handlers::handle_evaluate_symbol;
use crate::jobs::types::{EvaluateSymbolJob, JobOutcome};
use crate::notify::{Alert, RsiReport, RsiStatus};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<JobOutcome>,
    pub failures: Vec<SymbolFailure>,
    pub rsi_report: Option<RsiReport>,
}

impl RunSummary {
    pub fn evaluated(&self) -> usize {
        self.outcomes.len()
    }

    pub fn alerts_sent(&self) -> usize {
        self.outcomes.iter().filter(|o| o.alerted).count()
    }

    pub fn outcome_for(&self, symbol: &str) -> Option<&JobOutcome> {
        self.outcomes.iter().find(|o| o.record.symbol == symbol)
    }
}

/// Runs one evaluation pass over a set of symbols.
pub struct SignalRuntime {
    job_context: Arc<JobContext>,
    concurrency: usize,
}

impl SignalRuntime {
    /// Concurrency defaults to `WORKER_CONCURRENCY`, else one task per symbol.
    pub fn new(job_context: Arc<JobContext>) -> Self {
        let concurrency = job_context
            .config
            .concurrency
            .unwrap_or_else(|| job_context.config.all_symbols().len())
            .max(1);
        Self {
            job_context,
            concurrency,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Jobs for every configured symbol, portfolio membership attached.
    pub fn jobs_from_config(config: &Config) -> Vec<EvaluateSymbolJob> {
        config
            .all_symbols()
            .into_iter()
            .map(|symbol| {
                let portfolio = config.is_portfolio(&symbol);
                EvaluateSymbolJob::new(symbol, portfolio)
            })
            .collect()
    }

    pub async fn run(&self) -> RunSummary {
        self.run_batch(Self::jobs_from_config(&self.job_context.config))
            .await
    }

    pub async fn run_batch(&self, jobs: Vec<EvaluateSymbolJob>) -> RunSummary {
        let start = Instant::now();
        info!(
            symbols = jobs.len(),
            concurrency = self.concurrency,
            "SignalRuntime: evaluating {} symbols",
            jobs.len()
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut symbols_by_task = HashMap::new();
        for job in jobs {
            let ctx = self.job_context.clone();
            let semaphore = semaphore.clone();
            let symbol = job.symbol.clone();
            let handle = tasks.spawn(async move {
                // The semaphore is never closed.
                let _permit = semaphore.acquire_owned().await.ok();
                handle_evaluate_symbol(job, ctx).await
            });
            symbols_by_task.insert(handle.id(), symbol);
        }

        let mut summary = RunSummary::default();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, Ok(outcome))) => summary.outcomes.push(outcome),
                Ok((id, Err(e))) => {
                    let symbol = symbols_by_task.remove(&id).unwrap_or_default();
                    warn!(
                        symbol = %symbol,
                        error = %e,
                        "SignalRuntime: evaluation failed for {}",
                        symbol
                    );
                    if let Some(ref metrics) = self.job_context.metrics {
                        metrics
                            .symbol_failures_total
                            .with_label_values(&[e.reason()])
                            .inc();
                    }
                    summary.failures.push(SymbolFailure {
                        symbol,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    let symbol = symbols_by_task.remove(&e.id()).unwrap_or_default();
                    error!(symbol = %symbol, error = %e, "SignalRuntime: evaluation task panicked");
                    if let Some(ref metrics) = self.job_context.metrics {
                        metrics
                            .symbol_failures_total
                            .with_label_values(&["panic"])
                            .inc();
                    }
                    summary.failures.push(SymbolFailure {
                        symbol,
                        reason: "panicked".to_string(),
                    });
                }
            }
        }
        summary.outcomes.sort_by(|a, b| a.record.symbol.cmp(&b.record.symbol));
        summary.failures.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        summary.rsi_report = self.send_rsi_report(&summary.outcomes).await;

        let elapsed = start.elapsed().as_secs_f64();
        if let Some(ref metrics) = self.job_context.metrics {
            metrics.last_run_duration_seconds.set(elapsed);
        }
        info!(
            evaluated = summary.evaluated(),
            failed = summary.failures.len(),
            alerts = summary.alerts_sent(),
            duration_secs = elapsed,
            "SignalRuntime: run complete"
        );
        summary
    }

    async fn send_rsi_report(&self, outcomes: &[JobOutcome]) -> Option<RsiReport> {
        let statuses: Vec<RsiStatus> = outcomes.iter().filter_map(|o| o.rsi.clone()).collect();
        let threshold = self.job_context.config.alerts.rsi_low_alert_threshold;
        let report = RsiReport::build(&statuses, threshold);
        if report.is_empty() {
            return None;
        }

        match self.job_context.sink.send(Alert::report(report.render())).await {
            Ok(()) => {
                if let Some(ref metrics) = self.job_context.metrics {
                    metrics.alerts_emitted_total.inc();
                }
            }
            Err(e) => warn!(error = %e, "SignalRuntime: failed to deliver RSI report"),
        }
        Some(report)
    }
}
