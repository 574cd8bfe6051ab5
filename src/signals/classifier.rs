//! Signal classification: votes, aggregate kind and risk parameters for one
//! symbol on one day. Pure; no state survives between calls.

use crate::config::{LevelParams, RiskConfig, SignalConfig};
use crate::indicators::structure::calculate_support_resistance;
use crate::models::{IndicatorSnapshot, PricePoint, SignalBreakdown, SignalRecord};
use crate::signals::decision::StopLossTakeProfit;
use crate::strategies::{SignalStrategy, Strategy, StrategyInput};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct ClassifierInput<'a> {
    pub symbol: &'a str,
    pub date: NaiveDate,
    pub current_price: f64,
    pub today: IndicatorSnapshot,
    pub yesterday: Option<IndicatorSnapshot>,
    /// Days before `date` for support/resistance, most recent last.
    pub recent: &'a [PricePoint],
    /// Stamped onto the record as-is.
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SignalClassifier {
    strategy: Strategy,
    levels: LevelParams,
    risk: RiskConfig,
}

impl SignalClassifier {
    pub fn new(config: &SignalConfig) -> Self {
        Self {
            strategy: Strategy::from_config(config),
            levels: config.levels.clone(),
            risk: config.risk.clone(),
        }
    }

    pub fn classify(&self, input: &ClassifierInput<'_>) -> SignalRecord {
        let price = input.current_price;
        let levels = calculate_support_resistance(input.recent, price, &self.levels);

        let strategy_input = StrategyInput {
            current_price: price,
            today: &input.today,
            yesterday: input.yesterday.as_ref(),
            levels: &levels,
        };
        let votes = self.strategy.compute_subsignals(&strategy_input);
        let breakdown = SignalBreakdown::from_votes(votes);
        let aggregate = self.strategy.aggregate(&breakdown);
        let risk = StopLossTakeProfit::calculate(aggregate.kind, price, &levels, &self.risk);

        SignalRecord {
            symbol: input.symbol.to_string(),
            date: input.date,
            signal_kind: aggregate.kind,
            strength_percent: aggregate.strength_percent,
            current_price: price,
            support: levels.support,
            resistance: levels.resistance,
            stop_loss: risk.stop_loss,
            target: risk.target,
            risk_reward_ratio: risk.risk_reward_ratio,
            breakdown,
            generated_at: input.generated_at,
        }
    }
}
