use chrono::NaiveDate;
use thiserror::Error;

/// Sequence-level problems that stop a symbol from being evaluated.
///
/// Indicator warm-up is not an error: undefined values simply vote NEUTRAL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("no price data")]
    NoData,
    #[error("price data integrity violated at row {index} ({date}): {reason}")]
    DataIntegrity {
        index: usize,
        date: NaiveDate,
        reason: String,
    },
}
