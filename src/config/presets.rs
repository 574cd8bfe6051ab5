use super::{Config, MessageFormat};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bundled alert settings selectable with `PRESET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Strong signals only, short messages.
    Conservative,
    Balanced,
    /// More signals, detailed messages.
    Aggressive,
}

impl Preset {
    pub fn apply(&self, config: &mut Config) {
        let (format, min_votes, strong_only) = match self {
            Self::Conservative => (MessageFormat::Short, 4, true),
            Self::Balanced => (MessageFormat::Medium, 3, false),
            Self::Aggressive => (MessageFormat::Detailed, 2, false),
        };
        config.alerts.format = format;
        config.alerts.send_only_strong = strong_only;

        let votes = &mut config.signal.votes;
        votes.buy = min_votes;
        votes.sell = min_votes;
        votes.strong = votes.strong.max(min_votes);
        votes.weak = votes.weak.min(min_votes);
    }
}

impl FromStr for Preset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(()),
        }
    }
}
