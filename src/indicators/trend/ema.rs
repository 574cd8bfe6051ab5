//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// Incremental EMA seeded with the simple average of the first `period`
/// observations.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    seen: usize,
    seed_sum: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seen: 0,
            seed_sum: 0.0,
            value: None,
        }
    }

    /// Feed one observation; returns the EMA once warmed up.
    pub fn update(&mut self, value: f64) -> Option<f64> {
        match self.value {
            Some(previous) => {
                self.value = Some(math::ema_from_previous(value, previous, self.period));
            }
            None => {
                self.seen += 1;
                self.seed_sum += value;
                if self.seen == self.period {
                    self.value = Some(self.seed_sum / self.period as f64);
                }
            }
        }
        self.value
    }
}
