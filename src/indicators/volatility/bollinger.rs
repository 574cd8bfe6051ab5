//! Bollinger Bands indicator
//!
//! Middle Band = SMA(period)
//! Upper Band = Middle + (std_dev * standard deviation)
//! Lower Band = Middle - (std_dev * standard deviation)

use crate::common::math;
use crate::models::BollingerBand;

/// Bands over the trailing window ending at `values.last()`.
pub fn calculate_bollinger_bands(
    values: &[f64],
    period: usize,
    std_dev: f64,
) -> Option<BollingerBand> {
    let middle = math::sma(values, period)?;
    let std = math::standard_deviation(values, period)?;
    Some(BollingerBand {
        upper: middle + (std_dev * std),
        middle,
        lower: middle - (std_dev * std),
    })
}

/// Bands aligned with `values`.
pub fn bollinger_series(values: &[f64], period: usize, std_dev: f64) -> Vec<Option<BollingerBand>> {
    (0..values.len())
        .map(|i| calculate_bollinger_bands(&values[..=i], period, std_dev))
        .collect()
}
