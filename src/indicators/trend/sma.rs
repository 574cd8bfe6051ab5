//! SMA (Simple Moving Average) and moving-average crossovers

use crate::common::math;

/// SMA aligned with `values`; `None` until `period` values are available.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| math::sma(&values[..=i], period))
        .collect()
}

/// Short average crossing the long average between two consecutive days.
///
/// Returns 1 for a bullish cross, -1 for a bearish cross, 0 otherwise.
pub fn check_ma_cross(
    short_prev: f64,
    long_prev: f64,
    short_now: f64,
    long_now: f64,
) -> i32 {
    if short_now > long_now && short_prev <= long_prev {
        1
    } else if short_now < long_now && short_prev >= long_prev {
        -1
    } else {
        0
    }
}
