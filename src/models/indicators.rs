use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Indicator values aligned index-for-index with a price history.
///
/// `None` marks the warm-up period of each series; once a series becomes
/// defined it stays defined until the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub ma_short: Vec<Option<f64>>,
    pub ma_long: Vec<Option<f64>>,
    pub bollinger: Vec<Option<BollingerBand>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    /// Values at `index`, or `None` past the end of the series.
    pub fn snapshot(&self, index: usize) -> Option<IndicatorSnapshot> {
        if index >= self.len() {
            return None;
        }
        let macd = match (
            self.macd[index],
            self.macd_signal[index],
            self.macd_histogram[index],
        ) {
            (Some(macd), Some(signal), Some(histogram)) => Some(MacdIndicator {
                macd,
                signal,
                histogram,
            }),
            _ => None,
        };

        Some(IndicatorSnapshot {
            macd,
            rsi: self.rsi[index],
            ma_short: self.ma_short[index],
            ma_long: self.ma_long[index],
            bollinger: self.bollinger[index],
        })
    }

    pub fn latest(&self) -> Option<IndicatorSnapshot> {
        self.len().checked_sub(1).and_then(|i| self.snapshot(i))
    }

    pub fn previous(&self) -> Option<IndicatorSnapshot> {
        self.len().checked_sub(2).and_then(|i| self.snapshot(i))
    }
}

/// Indicator values for a single trading day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_short: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_long: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerBand>,
}

impl IndicatorSnapshot {
    pub fn with_macd(mut self, macd: f64, signal: f64) -> Self {
        self.macd = Some(MacdIndicator {
            macd,
            signal,
            histogram: macd - signal,
        });
        self
    }

    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn with_moving_averages(mut self, short: f64, long: f64) -> Self {
        self.ma_short = Some(short);
        self.ma_long = Some(long);
        self
    }
}

/// Trailing price extremes used for stop-loss and target placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
}

impl SupportResistance {
    pub fn new(support: f64, resistance: f64) -> Self {
        Self {
            support,
            resistance,
        }
    }
}
