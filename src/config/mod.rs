//! Configuration: the immutable signal parameters handed to the engine and
//! the run-level settings read from the environment.

mod presets;

pub use presets::Preset;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("invalid signal parameters: {0}")]
    InvalidParameters(String),
    #[error("failed to read stock list {path}: {source}")]
    StockList {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Which aggregation strategy classifies the indicator votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// MACD + RSI lookup table.
    TwoIndicator,
    /// Legacy vote tally across six indicators.
    SixIndicator,
}

impl FromStr for StrategyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two" | "two_indicator" | "2" => Ok(Self::TwoIndicator),
            "six" | "six_indicator" | "6" | "legacy" => Ok(Self::SixIndicator),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub ma_short: usize,
    pub ma_long: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            ma_short: 20,
            ma_long: 50,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiThresholds {
    pub oversold: f64,
    pub overbought: f64,
    pub midline: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
            midline: 50.0,
        }
    }
}

/// Which prices feed the support/resistance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSource {
    HighLow,
    Close,
}

impl FromStr for LevelSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high_low" | "highlow" | "hl" => Ok(Self::HighLow),
            "close" => Ok(Self::Close),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelParams {
    pub lookback: usize,
    pub source: LevelSource,
    /// Distance of the fallback level when the window has nothing on that
    /// side of the price.
    pub fallback_pct: f64,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            lookback: 20,
            source: LevelSource::HighLow,
            fallback_pct: 0.05,
        }
    }
}

/// Percentages (as fractions) for stop-loss and target placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Buffer beyond support/resistance (0.02 = 2%).
    pub level_buffer_pct: f64,
    /// Maximum distance of the stop from the current price.
    pub stop_loss_pct: f64,
    /// Maximum distance of the target from the current price.
    pub target_pct: f64,
    /// Symmetric band used for NEUTRAL records.
    pub neutral_band_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            level_buffer_pct: 0.02,
            stop_loss_pct: 0.05,
            target_pct: 0.10,
            neutral_band_pct: 0.05,
        }
    }
}

/// Vote counts for the six-indicator strategy. `buy` and `sell` are the
/// minimum tallies for a plain BUY or SELL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteThresholds {
    pub strong: usize,
    pub buy: usize,
    pub sell: usize,
    pub weak: usize,
}

impl Default for VoteThresholds {
    fn default() -> Self {
        Self {
            strong: 4,
            buy: 3,
            sell: 3,
            weak: 2,
        }
    }
}

/// Everything the indicator engine and classifier need. Built once, passed
/// by reference, never mutated during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    pub strategy: StrategyKind,
    pub indicators: IndicatorParams,
    pub rsi: RsiThresholds,
    pub levels: LevelParams,
    pub risk: RiskConfig,
    pub votes: VoteThresholds,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::TwoIndicator,
            indicators: IndicatorParams::default(),
            rsi: RsiThresholds::default(),
            levels: LevelParams::default(),
            risk: RiskConfig::default(),
            votes: VoteThresholds::default(),
        }
    }
}

impl SignalConfig {
    pub fn six_indicator() -> Self {
        Self {
            strategy: StrategyKind::SixIndicator,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        let periods = [
            ("macd_fast", ind.macd_fast),
            ("macd_slow", ind.macd_slow),
            ("macd_signal", ind.macd_signal),
            ("rsi_period", ind.rsi_period),
            ("ma_short", ind.ma_short),
            ("ma_long", ind.ma_long),
            ("levels.lookback", self.levels.lookback),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ConfigError::InvalidParameters(format!("{} must be > 0", name)));
        }
        if ind.bollinger_period < 2 {
            return Err(ConfigError::InvalidParameters(
                "bollinger_period must be >= 2".to_string(),
            ));
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::InvalidParameters(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                ind.macd_fast, ind.macd_slow
            )));
        }
        if ind.ma_short >= ind.ma_long {
            return Err(ConfigError::InvalidParameters(format!(
                "ma_short ({}) must be below ma_long ({})",
                ind.ma_short, ind.ma_long
            )));
        }
        if !(0.0..=100.0).contains(&self.rsi.oversold)
            || !(0.0..=100.0).contains(&self.rsi.overbought)
            || self.rsi.oversold >= self.rsi.overbought
        {
            return Err(ConfigError::InvalidParameters(format!(
                "RSI thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi.oversold, self.rsi.overbought
            )));
        }
        let risk = &self.risk;
        let pcts = [
            risk.level_buffer_pct,
            risk.stop_loss_pct,
            risk.target_pct,
            risk.neutral_band_pct,
            self.levels.fallback_pct,
        ];
        if pcts.iter().any(|p| !p.is_finite() || *p <= 0.0 || *p >= 1.0) {
            return Err(ConfigError::InvalidParameters(
                "risk percentages must be in (0, 1)".to_string(),
            ));
        }
        let votes = &self.votes;
        let ordered = |normal: usize| votes.weak <= normal && normal <= votes.strong;
        if votes.weak == 0 || !ordered(votes.buy) || !ordered(votes.sell) {
            return Err(ConfigError::InvalidParameters(format!(
                "vote thresholds must satisfy 0 < weak ({}) <= buy ({}), sell ({}) <= strong ({})",
                votes.weak, votes.buy, votes.sell, votes.strong
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Short,
    Medium,
    Detailed,
}

impl FromStr for MessageFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "detailed" => Ok(Self::Detailed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    pub format: MessageFormat,
    pub send_only_strong: bool,
    pub include_portfolio_header: bool,
    pub rsi_low_alert_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            format: MessageFormat::Short,
            send_only_strong: false,
            include_portfolio_header: true,
            rsi_low_alert_threshold: 35.0,
        }
    }
}

/// Run-level settings for the batch worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub data_dir: PathBuf,
    pub symbols: Vec<String>,
    pub portfolio: Vec<String>,
    pub signal: SignalConfig,
    pub alerts: AlertConfig,
    /// Evaluate history as of this date instead of the latest row.
    pub signal_date: Option<NaiveDate>,
    pub recent_signals_days: usize,
    pub signal_log_path: Option<PathBuf>,
    pub metrics_path: Option<PathBuf>,
    pub concurrency: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            data_dir: PathBuf::from("data"),
            symbols: Vec::new(),
            portfolio: Vec::new(),
            signal: SignalConfig::default(),
            alerts: AlertConfig::default(),
            signal_date: None,
            recent_signals_days: 5,
            signal_log_path: None,
            metrics_path: None,
            concurrency: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(environment) = get("ENVIRONMENT") {
            config.environment = environment;
        }
        if let Some(dir) = get("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(symbols) = get("SYMBOLS") {
            config.symbols = split_list(&symbols);
        } else if let Some(path) = get("STOCK_LIST") {
            config.symbols = load_stock_list(Path::new(&path))?;
        }
        if let Some(portfolio) = get("PORTFOLIO_STOCKS") {
            config.portfolio = split_list(&portfolio);
        }

        let signal = &mut config.signal;
        if let Some(mode) = get("SIGNAL_MODE") {
            signal.strategy = parse_with("SIGNAL_MODE", &mode)?;
        }
        parse_into(&get, "MACD_FAST", &mut signal.indicators.macd_fast)?;
        parse_into(&get, "MACD_SLOW", &mut signal.indicators.macd_slow)?;
        parse_into(&get, "MACD_SIGNAL", &mut signal.indicators.macd_signal)?;
        parse_into(&get, "RSI_PERIOD", &mut signal.indicators.rsi_period)?;
        parse_into(&get, "MA_SHORT_PERIOD", &mut signal.indicators.ma_short)?;
        parse_into(&get, "MA_LONG_PERIOD", &mut signal.indicators.ma_long)?;
        parse_into(&get, "BB_PERIOD", &mut signal.indicators.bollinger_period)?;
        parse_into(&get, "BB_STD_DEV", &mut signal.indicators.bollinger_std_dev)?;
        parse_into(&get, "RSI_OVERSOLD", &mut signal.rsi.oversold)?;
        parse_into(&get, "RSI_OVERBOUGHT", &mut signal.rsi.overbought)?;
        parse_into(&get, "SR_LOOKBACK", &mut signal.levels.lookback)?;
        if let Some(source) = get("SR_SOURCE") {
            signal.levels.source = parse_with("SR_SOURCE", &source)?;
        }
        parse_percent_into(&get, "SR_FALLBACK_PERCENT", &mut signal.levels.fallback_pct)?;
        parse_into(&get, "MIN_BUY_SIGNALS", &mut signal.votes.buy)?;
        parse_into(&get, "MIN_SELL_SIGNALS", &mut signal.votes.sell)?;
        parse_percent_into(&get, "DEFAULT_STOP_LOSS_PERCENT", &mut signal.risk.stop_loss_pct)?;
        parse_percent_into(&get, "DEFAULT_TARGET_PERCENT", &mut signal.risk.target_pct)?;
        parse_percent_into(
            &get,
            "SUPPORT_RESISTANCE_BUFFER",
            &mut signal.risk.level_buffer_pct,
        )?;

        let alerts = &mut config.alerts;
        if let Some(format) = get("MESSAGE_FORMAT") {
            alerts.format = parse_with("MESSAGE_FORMAT", &format)?;
        }
        parse_bool_into(&get, "SEND_ONLY_STRONG_SIGNALS", &mut alerts.send_only_strong)?;
        parse_bool_into(
            &get,
            "INCLUDE_PORTFOLIO_HEADER",
            &mut alerts.include_portfolio_header,
        )?;
        parse_into(
            &get,
            "RSI_LOW_ALERT_THRESHOLD",
            &mut alerts.rsi_low_alert_threshold,
        )?;

        if let Some(date) = get("SIGNAL_DATE") {
            let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigError::InvalidValue {
                    key: "SIGNAL_DATE".to_string(),
                    value: date.clone(),
                }
            })?;
            config.signal_date = Some(parsed);
        }
        parse_into(&get, "RECENT_SIGNALS_DAYS", &mut config.recent_signals_days)?;
        config.signal_log_path = get("SIGNAL_LOG_PATH").map(PathBuf::from);
        config.metrics_path = get("METRICS_PATH").map(PathBuf::from);
        if let Some(concurrency) = get("WORKER_CONCURRENCY") {
            config.concurrency = Some(parse_with("WORKER_CONCURRENCY", &concurrency)?);
        }

        if let Some(preset) = get("PRESET") {
            let preset: Preset = parse_with("PRESET", &preset)?;
            preset.apply(&mut config);
        }

        config.signal.validate()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        crate::logging::is_production(&self.environment)
    }

    pub fn is_portfolio(&self, symbol: &str) -> bool {
        self.portfolio.iter().any(|s| s.eq_ignore_ascii_case(symbol))
    }

    /// Configured symbols followed by portfolio symbols not already listed.
    pub fn all_symbols(&self) -> Vec<String> {
        let mut symbols = self.symbols.clone();
        for symbol in &self.portfolio {
            if !symbols.iter().any(|s| s.eq_ignore_ascii_case(symbol)) {
                symbols.push(symbol.clone());
            }
        }
        symbols
    }
}

/// First column of a CSV stock list, header row skipped.
pub fn load_stock_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let to_err = |source| ConfigError::StockList {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(to_err)?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record.map_err(to_err)?;
        if let Some(symbol) = record.get(0).map(str::trim).filter(|s| !s.is_empty()) {
            symbols.push(symbol.to_string());
        }
    }
    Ok(symbols)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_with<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_into<T, G>(get: &G, key: &str, slot: &mut T) -> Result<(), ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    if let Some(value) = get(key) {
        *slot = parse_with(key, &value)?;
    }
    Ok(())
}

/// Whole-number percentages (`5` means 5%) stored as fractions.
fn parse_percent_into<G>(get: &G, key: &str, slot: &mut f64) -> Result<(), ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(value) = get(key) {
        let percent: f64 = parse_with(key, &value)?;
        *slot = percent / 100.0;
    }
    Ok(())
}

fn parse_bool_into<G>(get: &G, key: &str, slot: &mut bool) -> Result<(), ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(value) = get(key) {
        let normalized = value.trim().to_ascii_lowercase();
        *slot = match normalized.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                })
            }
        };
    }
    Ok(())
}
