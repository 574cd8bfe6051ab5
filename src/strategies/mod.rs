//! Strategies turn indicator snapshots into votes and aggregate the votes
//! into a signal kind. The active strategy is picked from configuration.

pub mod six_indicator;
pub mod two_indicator;

pub use six_indicator::SixIndicatorStrategy;
pub use two_indicator::TwoIndicatorStrategy;

use crate::config::{SignalConfig, StrategyKind};
use crate::models::{
    IndicatorSnapshot, IndicatorVote, SignalBreakdown, SignalKind, SupportResistance,
};

/// Everything a strategy may look at for one symbol on one day.
#[derive(Debug, Clone, Copy)]
pub struct StrategyInput<'a> {
    pub current_price: f64,
    pub today: &'a IndicatorSnapshot,
    pub yesterday: Option<&'a IndicatorSnapshot>,
    pub levels: &'a SupportResistance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub kind: SignalKind,
    pub strength_percent: f64,
}

pub trait SignalStrategy {
    fn compute_subsignals(&self, input: &StrategyInput<'_>) -> Vec<IndicatorVote>;

    fn aggregate(&self, breakdown: &SignalBreakdown) -> Aggregate;
}

#[derive(Debug, Clone)]
pub enum Strategy {
    TwoIndicator(TwoIndicatorStrategy),
    SixIndicator(SixIndicatorStrategy),
}

impl Strategy {
    pub fn from_config(config: &SignalConfig) -> Self {
        match config.strategy {
            StrategyKind::TwoIndicator => Self::TwoIndicator(TwoIndicatorStrategy::new(config)),
            StrategyKind::SixIndicator => Self::SixIndicator(SixIndicatorStrategy::new(config)),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::TwoIndicator(_) => StrategyKind::TwoIndicator,
            Self::SixIndicator(_) => StrategyKind::SixIndicator,
        }
    }
}

impl SignalStrategy for Strategy {
    fn compute_subsignals(&self, input: &StrategyInput<'_>) -> Vec<IndicatorVote> {
        match self {
            Self::TwoIndicator(s) => s.compute_subsignals(input),
            Self::SixIndicator(s) => s.compute_subsignals(input),
        }
    }

    fn aggregate(&self, breakdown: &SignalBreakdown) -> Aggregate {
        match self {
            Self::TwoIndicator(s) => s.aggregate(breakdown),
            Self::SixIndicator(s) => s.aggregate(breakdown),
        }
    }
}

pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
