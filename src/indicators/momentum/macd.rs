//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(signal) of MACD
//! Histogram = MACD - Signal

use crate::indicators::trend::Ema;
use crate::models::MacdIndicator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    Bullish,
    Bearish,
    None,
}

/// One step of the MACD fold. Fields stay `None` during warm-up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacdStep {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Incremental MACD carrying the three EMA states forward.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
            signal: Ema::new(signal_period),
        }
    }

    pub fn update(&mut self, close: f64) -> MacdStep {
        let fast = self.fast.update(close);
        let slow = self.slow.update(close);
        let macd = match (fast, slow) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        };
        let signal = macd.and_then(|m| self.signal.update(m));
        let histogram = match (macd, signal) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        };
        MacdStep {
            macd,
            signal,
            histogram,
        }
    }
}

/// MACD steps aligned with `closes`.
pub fn macd_series(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Vec<MacdStep> {
    closes
        .iter()
        .scan(Macd::new(fast_period, slow_period, signal_period), |macd, &c| {
            Some(macd.update(c))
        })
        .collect()
}

/// Crossover of the MACD line through its signal line between two days.
///
/// Bullish when MACD moves from at-or-below the signal to strictly above it;
/// bearish for the mirror case. Staying on one side is not a crossover.
pub fn detect_crossover(previous: &MacdIndicator, current: &MacdIndicator) -> CrossoverType {
    if current.macd > current.signal && previous.macd <= previous.signal {
        CrossoverType::Bullish
    } else if current.macd < current.signal && previous.macd >= previous.signal {
        CrossoverType::Bearish
    } else {
        CrossoverType::None
    }
}
