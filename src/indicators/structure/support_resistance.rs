//! Support and Resistance levels detection

use crate::config::{LevelParams, LevelSource};
use crate::models::{PricePoint, SupportResistance};

/// Levels for `current_price` from the `lookback` days before it.
///
/// `prior` must not contain the day being evaluated, so a breakout close
/// never becomes its own resistance. With `LevelSource::HighLow` support is
/// the lowest low and resistance the highest high; with `LevelSource::Close`
/// both come from closing prices. A level only counts when it lies strictly
/// on its side of the price; otherwise it falls back to
/// `current_price × (1 ∓ fallback_pct)`.
pub fn calculate_support_resistance(
    prior: &[PricePoint],
    current_price: f64,
    params: &LevelParams,
) -> SupportResistance {
    let start = prior.len().saturating_sub(params.lookback);
    let window = &prior[start..];

    let (lowest, highest) = window.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lowest, highest), p| {
            let (low, high) = match params.source {
                LevelSource::HighLow => (p.low, p.high),
                LevelSource::Close => (p.close, p.close),
            };
            (lowest.min(low), highest.max(high))
        },
    );

    let support = if lowest < current_price {
        lowest
    } else {
        current_price * (1.0 - params.fallback_pct)
    };
    let resistance = if highest > current_price {
        highest
    } else {
        current_price * (1.0 + params.fallback_pct)
    };
    SupportResistance::new(support, resistance)
}
