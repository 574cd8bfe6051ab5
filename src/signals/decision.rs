//! Stop-loss, target and risk/reward derivation.

use crate::config::RiskConfig;
use crate::models::{RiskParameters, SignalKind, SupportResistance};

pub struct StopLossTakeProfit;

impl StopLossTakeProfit {
    /// Place stop and target for `kind` at `price`.
    ///
    /// Buys keep the higher of the two stop floors and the lower of the two
    /// target ceilings; sells mirror that. Neutral records get a symmetric
    /// band around the price.
    pub fn calculate(
        kind: SignalKind,
        price: f64,
        levels: &SupportResistance,
        risk: &RiskConfig,
    ) -> RiskParameters {
        let buffer = risk.level_buffer_pct;
        let (stop_loss, target) = if kind.is_buy() {
            (
                (levels.support * (1.0 - buffer)).max(price * (1.0 - risk.stop_loss_pct)),
                (levels.resistance * (1.0 + buffer)).min(price * (1.0 + risk.target_pct)),
            )
        } else if kind.is_sell() {
            (
                (levels.resistance * (1.0 + buffer)).min(price * (1.0 + risk.stop_loss_pct)),
                (levels.support * (1.0 - buffer)).max(price * (1.0 - risk.target_pct)),
            )
        } else {
            (
                price * (1.0 - risk.neutral_band_pct),
                price * (1.0 + risk.neutral_band_pct),
            )
        };

        RiskParameters {
            stop_loss,
            target,
            risk_reward_ratio: risk_reward_ratio(kind, price, stop_loss, target),
        }
    }
}

/// Reward per unit of risk.
///
/// Buy side (and neutral): `(target - price) / (price - stop)`.
/// Sell side: `(price - target) / (stop - price)`.
/// `None` when the stop equals the price.
pub fn risk_reward_ratio(kind: SignalKind, price: f64, stop_loss: f64, target: f64) -> Option<f64> {
    let (reward, risk) = if kind.is_sell() {
        (price - target, stop_loss - price)
    } else {
        (target - price, price - stop_loss)
    };
    if risk == 0.0 {
        return None;
    }
    Some(reward / risk).filter(|r| r.is_finite())
}
