//! Sanity checks on a price history before any indicator is computed.

use crate::indicators::error::IndicatorError;
use crate::models::PricePoint;

/// Reject empty histories, non-chronological dates and malformed rows.
pub fn validate_history(history: &[PricePoint]) -> Result<(), IndicatorError> {
    if history.is_empty() {
        return Err(IndicatorError::NoData);
    }

    for (index, point) in history.iter().enumerate() {
        if let Some(reason) = malformed_reason(point) {
            return Err(IndicatorError::DataIntegrity {
                index,
                date: point.date,
                reason,
            });
        }
        if index > 0 {
            let previous = &history[index - 1];
            if point.date == previous.date {
                return Err(IndicatorError::DataIntegrity {
                    index,
                    date: point.date,
                    reason: "duplicate date".to_string(),
                });
            }
            if point.date < previous.date {
                return Err(IndicatorError::DataIntegrity {
                    index,
                    date: point.date,
                    reason: format!("date precedes previous row ({})", previous.date),
                });
            }
        }
    }
    Ok(())
}

fn malformed_reason(point: &PricePoint) -> Option<String> {
    let fields = [
        ("open", point.open),
        ("high", point.high),
        ("low", point.low),
        ("close", point.close),
        ("volume", point.volume),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Some(format!("{} is not finite ({})", name, value));
    }
    if point.close <= 0.0 {
        return Some(format!("close must be positive ({})", point.close));
    }
    if point.high < point.low {
        return Some(format!("high {} below low {}", point.high, point.low));
    }
    None
}
