//! Indicator engine: validates a price history and computes every series
//! the strategies consume in a single pass.

use crate::config::IndicatorParams;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{macd_series, rsi_series};
use crate::indicators::trend::sma_series;
use crate::indicators::validation::validate_history;
use crate::indicators::volatility::bollinger_series;
use crate::models::price::closes;
use crate::models::{IndicatorSeries, PricePoint};
use tracing::trace;

/// Compute MACD, RSI, moving averages and Bollinger Bands for `history`.
///
/// The returned series have the same length as `history`; warm-up entries are
/// `None`.
pub fn compute_indicators(
    history: &[PricePoint],
    params: &IndicatorParams,
) -> Result<IndicatorSeries, IndicatorError> {
    validate_history(history)?;

    let closes = closes(history);
    let steps = macd_series(
        &closes,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );

    let mut series = IndicatorSeries {
        macd: steps.iter().map(|s| s.macd).collect(),
        macd_signal: steps.iter().map(|s| s.signal).collect(),
        macd_histogram: steps.iter().map(|s| s.histogram).collect(),
        rsi: rsi_series(&closes, params.rsi_period),
        ..IndicatorSeries::default()
    };
    series.ma_short = sma_series(&closes, params.ma_short);
    series.ma_long = sma_series(&closes, params.ma_long);
    series.bollinger = bollinger_series(
        &closes,
        params.bollinger_period,
        params.bollinger_std_dev,
    );

    trace!(
        points = history.len(),
        macd_defined = series.macd_signal.iter().filter(|v| v.is_some()).count(),
        rsi_defined = series.rsi.iter().filter(|v| v.is_some()).count(),
        "indicator series computed"
    );

    Ok(series)
}
