//! Unit tests for support/resistance levels

use crate::test_utils::{assert_close, day, history_from_closes, rising_closes};
use signalwatch::config::{LevelParams, LevelSource};
use signalwatch::indicators::structure::calculate_support_resistance;
use signalwatch::models::PricePoint;

#[test]
fn test_empty_window_falls_back_to_band() {
    let levels = calculate_support_resistance(&[], 200.0, &LevelParams::default());
    assert_close(levels.support, 190.0);
    assert_close(levels.resistance, 210.0);
}

#[test]
fn test_high_low_window_is_trailing_lookback() {
    let mut prior: Vec<PricePoint> = (0..25)
        .map(|i| PricePoint::new(day(i), 100.0, 105.0, 95.0, 100.0, 0.0))
        .collect();
    // Outside the 20-day window
    prior[2].low = 50.0;
    prior[24].high = 130.0;

    let levels = calculate_support_resistance(&prior, 101.0, &LevelParams::default());
    assert_eq!(levels.support, 95.0);
    assert_eq!(levels.resistance, 130.0);
}

#[test]
fn test_close_source() {
    let prior = history_from_closes(&[10.0, 12.0, 8.0, 11.0]);
    let params = LevelParams {
        lookback: 3,
        source: LevelSource::Close,
        ..LevelParams::default()
    };
    let levels = calculate_support_resistance(&prior, 10.0, &params);
    assert_eq!(levels.support, 8.0);
    assert_eq!(levels.resistance, 12.0);
}

#[test]
fn test_breakout_above_window_uses_fallback_resistance() {
    let prior = history_from_closes(&rising_closes(19, 100.0, 1.0));
    let levels = calculate_support_resistance(&prior, 119.0, &LevelParams::default());
    assert_eq!(levels.support, 100.0);
    assert_close(levels.resistance, 119.0 * 1.05);
}

#[test]
fn test_breakdown_below_window_uses_fallback_support() {
    let prior = history_from_closes(&rising_closes(10, 50.0, 1.0));
    let levels = calculate_support_resistance(&prior, 40.0, &LevelParams::default());
    assert_close(levels.support, 40.0 * 0.95);
    assert_eq!(levels.resistance, 59.0);
}

#[test]
fn test_level_equal_to_price_does_not_count() {
    let prior = history_from_closes(&[90.0, 100.0]);
    let levels = calculate_support_resistance(&prior, 100.0, &LevelParams::default());
    assert_eq!(levels.support, 90.0);
    assert_close(levels.resistance, 105.0);
}
