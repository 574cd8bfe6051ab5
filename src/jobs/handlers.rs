//! Job handler for symbol evaluation
//!
//! Reads history, classifies the evaluated day, records the signal and hands
//! an alert to the sink when the alert filter lets it through.

use crate::indicators::IndicatorError;
use crate::jobs::context::JobContext;
use crate::jobs::types::{EvaluateSymbolJob, JobOutcome};
use crate::models::IndicatorSeries;
use crate::notify::{self, Alert, RsiStatus};
use crate::services::market_data::SourceError;
use crate::signals::engine::truncate_to;
use crate::signals::{recent_crossovers, SignalEngine};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum JobError {
    #[error("price history unavailable: {0}")]
    Source(#[from] SourceError),
    #[error("evaluation failed: {0}")]
    Indicator(#[from] IndicatorError),
}

impl JobError {
    /// Short label for the failure metric.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Source(SourceError::NotFound(_)) => "not_found",
            Self::Source(_) => "source",
            Self::Indicator(IndicatorError::NoData) => "no_data",
            Self::Indicator(IndicatorError::DataIntegrity { .. }) => "data_integrity",
        }
    }
}

pub async fn handle_evaluate_symbol(
    job: EvaluateSymbolJob,
    ctx: Arc<JobContext>,
) -> Result<JobOutcome, JobError> {
    let config = &ctx.config;
    let symbol = job.symbol.as_str();

    let full_history = ctx.data_provider.get_history(symbol).await?;
    let history = match config.signal_date {
        Some(date) => truncate_to(&full_history, date),
        None => &full_history[..],
    };
    debug!(
        symbol = %symbol,
        rows = history.len(),
        as_of = ?config.signal_date,
        "evaluating symbol"
    );

    let (record, series) = SignalEngine::evaluate_with_indicators(symbol, history, &config.signal)?;
    let crossovers = recent_crossovers(history, &series, config.recent_signals_days);
    let rsi = rsi_status(symbol, &series, record.current_price, record.date, &job, ctx.as_ref());

    if record.is_actionable() {
        info!(
            symbol = %symbol,
            kind = %record.signal_kind,
            strength = record.strength_percent,
            price = record.current_price,
            stop_loss = record.stop_loss,
            target = record.target,
            "signal generated for {}: {}",
            symbol,
            record.signal_kind
        );
    } else {
        debug!(
            symbol = %symbol,
            strength = record.strength_percent,
            "neutral signal for {}",
            symbol
        );
    }
    for event in &crossovers {
        debug!(
            symbol = %symbol,
            date = %event.date,
            crossover = ?event.crossover,
            "recent MACD crossover"
        );
    }

    if let Some(ref metrics) = ctx.metrics {
        metrics.symbols_evaluated_total.inc();
        metrics
            .signals_generated_total
            .with_label_values(&[record.signal_kind.as_str()])
            .inc();
    }

    if let Some(ref log) = ctx.signal_log {
        if let Err(e) = log.append(&record).await {
            warn!(
                symbol = %symbol,
                error = %e,
                path = %log.path().display(),
                "failed to append signal log"
            );
        }
    }

    let mut alerted = false;
    if notify::should_alert(&record, &config.alerts) {
        let header = job.portfolio && config.alerts.include_portfolio_header;
        let message = notify::render(&record, config.alerts.format, header);
        match ctx.sink.send(Alert::for_symbol(symbol, message)).await {
            Ok(()) => {
                alerted = true;
                if let Some(ref metrics) = ctx.metrics {
                    metrics.alerts_emitted_total.inc();
                }
            }
            Err(e) => warn!(symbol = %symbol, error = %e, "failed to deliver alert"),
        }
    }

    Ok(JobOutcome {
        record,
        rsi,
        recent_crossovers: crossovers,
        alerted,
    })
}

fn rsi_status(
    symbol: &str,
    series: &IndicatorSeries,
    price: f64,
    date: NaiveDate,
    job: &EvaluateSymbolJob,
    ctx: &JobContext,
) -> Option<RsiStatus> {
    let rsi = series.latest()?.rsi?;
    Some(RsiStatus::new(
        symbol,
        rsi,
        price,
        date,
        &ctx.config.signal.rsi,
        job.portfolio,
    ))
}
