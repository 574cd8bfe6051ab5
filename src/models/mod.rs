//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod price;
pub mod signal;

pub use indicators::{
    BollingerBand, IndicatorSeries, IndicatorSnapshot, MacdIndicator, SupportResistance,
};
pub use price::PricePoint;
pub use signal::{
    IndicatorName, IndicatorVote, RiskParameters, SignalBreakdown, SignalKind, SignalRecord, Vote,
};
