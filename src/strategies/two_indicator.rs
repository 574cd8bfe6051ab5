//! Default strategy: MACD crossover and RSI, combined by lookup table.

use super::{percentage, Aggregate, SignalStrategy, StrategyInput};
use crate::config::{RsiThresholds, SignalConfig};
use crate::models::{IndicatorVote, SignalBreakdown, SignalKind};
use crate::signals::subsignals::{analyze_macd, analyze_rsi};

#[derive(Debug, Clone)]
pub struct TwoIndicatorStrategy {
    rsi: RsiThresholds,
}

impl TwoIndicatorStrategy {
    pub fn new(config: &SignalConfig) -> Self {
        Self {
            rsi: config.rsi.clone(),
        }
    }
}

impl SignalStrategy for TwoIndicatorStrategy {
    fn compute_subsignals(&self, input: &StrategyInput<'_>) -> Vec<IndicatorVote> {
        let yesterday = input.yesterday;
        vec![
            analyze_macd(
                input.today.macd.as_ref(),
                yesterday.and_then(|y| y.macd.as_ref()),
            ),
            analyze_rsi(input.today.rsi, yesterday.and_then(|y| y.rsi), &self.rsi),
        ]
    }

    /// | buys | sells | result      | strength |
    /// |------|-------|-------------|----------|
    /// | 2    | 0     | STRONG_BUY  | 100      |
    /// | 1    | 0     | BUY         | 50       |
    /// | 0    | 2     | STRONG_SELL | 100      |
    /// | 0    | 1     | SELL        | 50       |
    /// | 1    | 1     | NEUTRAL     | 50       |
    /// | 0    | 0     | NEUTRAL     | 0        |
    fn aggregate(&self, breakdown: &SignalBreakdown) -> Aggregate {
        let total = breakdown.total();
        let buy_pct = percentage(breakdown.buy_count, total);
        let sell_pct = percentage(breakdown.sell_count, total);

        let (kind, strength_percent) = match (breakdown.buy_count, breakdown.sell_count) {
            (b, _) if b >= 2 => (SignalKind::StrongBuy, buy_pct),
            (_, s) if s >= 2 => (SignalKind::StrongSell, sell_pct),
            (1, 0) => (SignalKind::Buy, buy_pct),
            (0, 1) => (SignalKind::Sell, sell_pct),
            (1, 1) => (SignalKind::Neutral, 50.0),
            _ => (SignalKind::Neutral, buy_pct.max(sell_pct)),
        };
        Aggregate {
            kind,
            strength_percent,
        }
    }
}
