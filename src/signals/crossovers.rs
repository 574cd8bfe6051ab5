//! MACD crossover history, used to report crossovers from the last few
//! trading days rather than only today's.

use crate::indicators::momentum::{detect_crossover, CrossoverType};
use crate::models::{IndicatorSeries, PricePoint};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossoverEvent {
    pub date: NaiveDate,
    pub crossover: CrossoverType,
    pub macd: f64,
    pub signal: f64,
    pub close: f64,
}

/// Every bullish or bearish crossover in the series, oldest first.
pub fn all_crossovers(history: &[PricePoint], series: &IndicatorSeries) -> Vec<CrossoverEvent> {
    let len = history.len().min(series.len());
    (1..len)
        .filter_map(|i| {
            let previous = series.snapshot(i - 1)?.macd?;
            let current = series.snapshot(i)?.macd?;
            match detect_crossover(&previous, &current) {
                CrossoverType::None => None,
                crossover => Some(CrossoverEvent {
                    date: history[i].date,
                    crossover,
                    macd: current.macd,
                    signal: current.signal,
                    close: history[i].close,
                }),
            }
        })
        .collect()
}

/// Crossovers within the last `days` trading days.
pub fn recent_crossovers(
    history: &[PricePoint],
    series: &IndicatorSeries,
    days: usize,
) -> Vec<CrossoverEvent> {
    let Some(first_day) = history.get(history.len().saturating_sub(days)) else {
        return Vec::new();
    };
    all_crossovers(history, series)
        .into_iter()
        .filter(|event| event.date >= first_day.date)
        .collect()
}
