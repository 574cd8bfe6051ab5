use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall classification of a symbol for the evaluated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    StrongBuy,
    Buy,
    WeakBuy,
    Neutral,
    WeakSell,
    Sell,
    StrongSell,
}

impl SignalKind {
    pub fn is_buy(&self) -> bool {
        matches!(self, Self::StrongBuy | Self::Buy | Self::WeakBuy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Self::StrongSell | Self::Sell | Self::WeakSell)
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Self::StrongBuy | Self::StrongSell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG_BUY",
            Self::Buy => "BUY",
            Self::WeakBuy => "WEAK_BUY",
            Self::Neutral => "NEUTRAL",
            Self::WeakSell => "WEAK_SELL",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG_SELL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::StrongBuy => "🟢🟢🟢",
            Self::Buy => "🟢🟢",
            Self::WeakBuy => "🟢",
            Self::Neutral => "🟡",
            Self::WeakSell => "🔴",
            Self::Sell => "🔴🔴",
            Self::StrongSell => "🔴🔴🔴",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single indicator's opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vote {
    Buy,
    Neutral,
    Sell,
}

impl Vote {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Buy => "✅",
            Self::Sell => "❌",
            Self::Neutral => "➖",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorName {
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MA_Cross")]
    MaCrossover,
    #[serde(rename = "MA_Trend")]
    MaTrend,
    #[serde(rename = "Bollinger")]
    Bollinger,
    #[serde(rename = "Support_Resistance")]
    SupportResistance,
}

impl fmt::Display for IndicatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Macd => "MACD",
            Self::Rsi => "RSI",
            Self::MaCrossover => "MA_Cross",
            Self::MaTrend => "MA_Trend",
            Self::Bollinger => "Bollinger",
            Self::SupportResistance => "Support_Resistance",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorVote {
    pub indicator: IndicatorName,
    pub vote: Vote,
    pub reason: String,
}

impl IndicatorVote {
    pub fn new(indicator: IndicatorName, vote: Vote, reason: impl Into<String>) -> Self {
        Self {
            indicator,
            vote,
            reason: reason.into(),
        }
    }
}

/// Per-indicator votes and their tally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub votes: Vec<IndicatorVote>,
    pub buy_count: usize,
    pub sell_count: usize,
    pub neutral_count: usize,
}

impl SignalBreakdown {
    pub fn from_votes(votes: Vec<IndicatorVote>) -> Self {
        let count = |v: Vote| votes.iter().filter(|iv| iv.vote == v).count();
        let buy_count = count(Vote::Buy);
        let sell_count = count(Vote::Sell);
        let neutral_count = count(Vote::Neutral);
        Self {
            votes,
            buy_count,
            sell_count,
            neutral_count,
        }
    }

    pub fn total(&self) -> usize {
        self.votes.len()
    }

    pub fn vote_for(&self, indicator: IndicatorName) -> Option<&IndicatorVote> {
        self.votes.iter().find(|v| v.indicator == indicator)
    }
}

/// Stop-loss, target and the resulting risk/reward for a classified signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParameters {
    pub stop_loss: f64,
    pub target: f64,
    /// `None` when the stop-loss sits exactly on the current price.
    pub risk_reward_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub date: NaiveDate,
    pub signal_kind: SignalKind,
    pub strength_percent: f64,
    pub current_price: f64,
    pub support: f64,
    pub resistance: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub risk_reward_ratio: Option<f64>,
    pub breakdown: SignalBreakdown,
    pub generated_at: DateTime<Utc>,
}

impl SignalRecord {
    pub fn is_actionable(&self) -> bool {
        self.signal_kind != SignalKind::Neutral
    }
}
