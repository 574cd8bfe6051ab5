//! Signal engine: price history in, signal record out.

use crate::config::SignalConfig;
use crate::indicators::{compute_indicators, IndicatorError};
use crate::models::{IndicatorSeries, PricePoint, SignalRecord};
use crate::signals::classifier::{ClassifierInput, SignalClassifier};
use chrono::{NaiveDate, Utc};

pub struct SignalEngine;

impl SignalEngine {
    /// Classify the latest day of `history`.
    pub fn evaluate(
        symbol: &str,
        history: &[PricePoint],
        config: &SignalConfig,
    ) -> Result<SignalRecord, IndicatorError> {
        Self::evaluate_with_indicators(symbol, history, config).map(|(record, _)| record)
    }

    /// Classify the last day on or before `date`.
    pub fn evaluate_as_of(
        symbol: &str,
        history: &[PricePoint],
        date: NaiveDate,
        config: &SignalConfig,
    ) -> Result<SignalRecord, IndicatorError> {
        Self::evaluate(symbol, truncate_to(history, date), config)
    }

    /// Classify the latest day and hand back the full indicator series too.
    pub fn evaluate_with_indicators(
        symbol: &str,
        history: &[PricePoint],
        config: &SignalConfig,
    ) -> Result<(SignalRecord, IndicatorSeries), IndicatorError> {
        let series = compute_indicators(history, &config.indicators)?;
        let today = series.latest().ok_or(IndicatorError::NoData)?;
        let (last, prior) = history.split_last().ok_or(IndicatorError::NoData)?;
        let window_start = prior.len().saturating_sub(config.levels.lookback);

        let input = ClassifierInput {
            symbol,
            date: last.date,
            current_price: last.close,
            today,
            yesterday: series.previous(),
            recent: &prior[window_start..],
            generated_at: Utc::now(),
        };
        let record = SignalClassifier::new(config).classify(&input);
        Ok((record, series))
    }
}

/// Prefix of `history` up to and including `date`.
pub fn truncate_to(history: &[PricePoint], date: NaiveDate) -> &[PricePoint] {
    let end = history.partition_point(|p| p.date <= date);
    &history[..end]
}
