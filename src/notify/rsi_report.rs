//! Portfolio RSI status report and low-RSI watch list.

use crate::config::RsiThresholds;
use crate::indicators::momentum::RsiZone;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiStatus {
    pub symbol: String,
    pub rsi: f64,
    pub price: f64,
    pub date: NaiveDate,
    pub zone: RsiZone,
    pub portfolio: bool,
}

impl RsiStatus {
    pub fn new(
        symbol: impl Into<String>,
        rsi: f64,
        price: f64,
        date: NaiveDate,
        thresholds: &RsiThresholds,
        portfolio: bool,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            rsi,
            price,
            date,
            zone: RsiZone::classify(rsi, thresholds),
            portfolio,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RsiReport {
    pub portfolio: Vec<RsiStatus>,
    pub low_rsi_watch: Vec<RsiStatus>,
}

impl RsiReport {
    /// Portfolio entries go to the status section; other symbols at or below
    /// `low_threshold` go to the watch list, lowest RSI first.
    pub fn build(statuses: &[RsiStatus], low_threshold: f64) -> Self {
        let mut portfolio: Vec<RsiStatus> =
            statuses.iter().filter(|s| s.portfolio).cloned().collect();
        portfolio.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let mut low_rsi_watch: Vec<RsiStatus> = statuses
            .iter()
            .filter(|s| !s.portfolio && s.rsi <= low_threshold)
            .cloned()
            .collect();
        low_rsi_watch.sort_by(|a, b| a.rsi.total_cmp(&b.rsi));

        Self {
            portfolio,
            low_rsi_watch,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty() && self.low_rsi_watch.is_empty()
    }

    pub fn count(&self, zone: RsiZone) -> usize {
        self.portfolio.iter().filter(|s| s.zone == zone).count()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("📊 <b>YOUR PORTFOLIO RSI STATUS</b>\n");
        let _ = writeln!(
            out,
            "🟢 Oversold: {} | 🔴 Overbought: {} | ⚪ Neutral: {}",
            self.count(RsiZone::Oversold),
            self.count(RsiZone::Overbought),
            self.count(RsiZone::Neutral)
        );

        for status in &self.portfolio {
            let (icon, hint) = match status.zone {
                RsiZone::Oversold => ("🟢", "💡 Potential BUY opportunity"),
                RsiZone::Overbought => ("🔴", "💡 Consider taking profits"),
                RsiZone::Neutral => ("⚪", "Holding steady"),
            };
            let _ = write!(
                out,
                "\n{icon} <b>{}</b>: RSI {:.1} - {}\n   Price: {:.2} ({})\n   {hint}\n",
                status.symbol,
                status.rsi,
                status.zone.as_str(),
                status.price,
                status.date
            );
        }

        if !self.low_rsi_watch.is_empty() {
            out.push_str("\n👀 <b>LOW RSI WATCH</b>\n");
            for status in &self.low_rsi_watch {
                let _ = writeln!(
                    out,
                    "• {}: RSI {:.1} (Price: {:.2})",
                    status.symbol, status.rsi, status.price
                );
            }
        }

        out.push_str("\n⚠️ Always do your own research before trading!");
        out
    }
}
