//! Legacy strategy: six indicators vote and the tally decides.

use super::{percentage, Aggregate, SignalStrategy, StrategyInput};
use crate::config::{IndicatorParams, RsiThresholds, SignalConfig, VoteThresholds};
use crate::models::{IndicatorVote, SignalBreakdown, SignalKind};
use crate::signals::subsignals::{
    analyze_bollinger, analyze_ma_crossover, analyze_ma_trend, analyze_macd, analyze_rsi,
    analyze_support_resistance,
};

#[derive(Debug, Clone)]
pub struct SixIndicatorStrategy {
    indicators: IndicatorParams,
    rsi: RsiThresholds,
    votes: VoteThresholds,
    level_buffer_pct: f64,
}

impl SixIndicatorStrategy {
    pub fn new(config: &SignalConfig) -> Self {
        Self {
            indicators: config.indicators.clone(),
            rsi: config.rsi.clone(),
            votes: config.votes.clone(),
            level_buffer_pct: config.risk.level_buffer_pct,
        }
    }

    /// `kinds` is (strong, normal, weak) for one side; `min_normal` is that
    /// side's plain BUY/SELL threshold.
    fn grade(&self, count: usize, min_normal: usize, kinds: [SignalKind; 3]) -> SignalKind {
        let [strong, normal, weak] = kinds;
        if count >= self.votes.strong {
            strong
        } else if count >= min_normal {
            normal
        } else if count >= self.votes.weak {
            weak
        } else {
            SignalKind::Neutral
        }
    }
}

impl SignalStrategy for SixIndicatorStrategy {
    fn compute_subsignals(&self, input: &StrategyInput<'_>) -> Vec<IndicatorVote> {
        let today = input.today;
        let yesterday = input.yesterday;
        let price = input.current_price;
        vec![
            analyze_macd(today.macd.as_ref(), yesterday.and_then(|y| y.macd.as_ref())),
            analyze_rsi(today.rsi, yesterday.and_then(|y| y.rsi), &self.rsi),
            analyze_ma_crossover(today, yesterday, &self.indicators),
            analyze_ma_trend(price, today, &self.indicators),
            analyze_bollinger(price, today.bollinger.as_ref()),
            analyze_support_resistance(price, input.levels, self.level_buffer_pct),
        ]
    }

    /// Buy and sell tallies are graded against the strong/normal/weak
    /// thresholds; equal tallies are NEUTRAL.
    fn aggregate(&self, breakdown: &SignalBreakdown) -> Aggregate {
        let total = breakdown.total();
        let (buys, sells) = (breakdown.buy_count, breakdown.sell_count);
        let buy_pct = percentage(buys, total);
        let sell_pct = percentage(sells, total);

        let kind = if buys > sells {
            let kinds = [SignalKind::StrongBuy, SignalKind::Buy, SignalKind::WeakBuy];
            self.grade(buys, self.votes.buy, kinds)
        } else if sells > buys {
            let kinds = [SignalKind::StrongSell, SignalKind::Sell, SignalKind::WeakSell];
            self.grade(sells, self.votes.sell, kinds)
        } else {
            SignalKind::Neutral
        };

        let strength_percent = if kind.is_buy() {
            buy_pct
        } else if kind.is_sell() {
            sell_pct
        } else {
            buy_pct.max(sell_pct)
        };
        Aggregate {
            kind,
            strength_percent,
        }
    }
}
