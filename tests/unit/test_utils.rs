//! Shared fixtures for unit tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use signalwatch::models::PricePoint;

pub fn day(offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset as i64)
}

/// One point per close on consecutive days, open/high/low equal to close.
pub fn history_from_closes(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PricePoint::from_close(day(i), c))
        .collect()
}

pub fn rising_closes(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// A smooth oscillation that produces regular MACD crossovers.
pub fn wave_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + 10.0 * (i as f64 * std::f64::consts::TAU / 30.0).sin())
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
