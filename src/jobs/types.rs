//! Job types for per-symbol evaluation

use crate::models::SignalRecord;
use crate::notify::RsiStatus;
use crate::signals::CrossoverEvent;
use serde::{Deserialize, Serialize};

/// Evaluate one symbol from its stored price history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateSymbolJob {
    pub symbol: String,
    pub portfolio: bool,
}

impl EvaluateSymbolJob {
    pub fn new(symbol: impl Into<String>, portfolio: bool) -> Self {
        Self {
            symbol: symbol.into(),
            portfolio,
        }
    }
}

/// What a successful evaluation produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutcome {
    pub record: SignalRecord,
    pub rsi: Option<RsiStatus>,
    pub recent_crossovers: Vec<CrossoverEvent>,
    pub alerted: bool,
}
