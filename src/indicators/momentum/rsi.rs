//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS))
//! RS = Average Gain / Average Loss, smoothed with Wilder's method

use crate::common::math;
use crate::config::RsiThresholds;
use serde::{Deserialize, Serialize};

/// Incremental Wilder RSI.
///
/// The first averages are the simple mean of the first `period` gains and
/// losses, so the RSI is defined from the `period + 1`-th price onwards.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<f64>,
    seen: usize,
    gain_sum: f64,
    loss_sum: f64,
    averages: Option<(f64, f64)>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev_close: None,
            seen: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            averages: None,
        }
    }

    pub fn update(&mut self, close: f64) -> Option<f64> {
        let previous = self.prev_close.replace(close)?;
        let change = close - previous;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        self.averages = match self.averages {
            Some((avg_gain, avg_loss)) => Some((
                math::wilder_step(avg_gain, gain, self.period),
                math::wilder_step(avg_loss, loss, self.period),
            )),
            None => {
                self.seen += 1;
                self.gain_sum += gain;
                self.loss_sum += loss;
                if self.seen == self.period {
                    let n = self.period as f64;
                    Some((self.gain_sum / n, self.loss_sum / n))
                } else {
                    None
                }
            }
        };

        self.averages
            .map(|(avg_gain, avg_loss)| rsi_from_averages(avg_gain, avg_loss))
    }
}

/// RSI from smoothed averages; 100 when there were no losses.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// RSI aligned with `closes`.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    closes
        .iter()
        .scan(Rsi::new(period), |rsi, &c| Some(rsi.update(c)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    pub fn classify(rsi: f64, thresholds: &RsiThresholds) -> Self {
        if rsi <= thresholds.oversold {
            Self::Oversold
        } else if rsi >= thresholds.overbought {
            Self::Overbought
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oversold => "OVERSOLD",
            Self::Neutral => "NEUTRAL",
            Self::Overbought => "OVERBOUGHT",
        }
    }
}
