//! Daily price histories stored as one CSV file per symbol.

use crate::models::PricePoint;
use crate::services::market_data::{PriceHistorySource, SourceError};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Reads `{data_dir}/{SYMBOL}.csv`. A `/` in the symbol maps to `-`.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    data_dir: PathBuf,
}

impl CsvPriceSource {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol.replace('/', "-")))
    }
}

#[async_trait]
impl PriceHistorySource for CsvPriceSource {
    async fn get_history(&self, symbol: &str) -> Result<Vec<PricePoint>, SourceError> {
        let path = self.path_for(symbol);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(symbol.to_string()),
            _ => SourceError::Io {
                path: path.clone(),
                source: e,
            },
        })?;
        let history = parse_history(&bytes)?;
        debug!(
            symbol = %symbol,
            rows = history.len(),
            path = %path.display(),
            "loaded price history"
        );
        Ok(history)
    }
}

/// Parse a price CSV into an ascending, date-unique history.
///
/// Headers are matched case-insensitively. The date column is
/// `published_date` or `date`; `close` is required. Missing
/// `open`/`high`/`low` fall back to the close and a missing volume
/// (`volume` or `traded_quantity`) is zero. Later rows win on duplicate
/// dates.
pub fn parse_history(bytes: &[u8]) -> Result<Vec<PricePoint>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_lowercase()).collect();
    let column = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let date_col = column(&["published_date", "date"]).ok_or(SourceError::MissingColumn("date"))?;
    let close_col = column(&["close"]).ok_or(SourceError::MissingColumn("close"))?;
    let open_col = column(&["open"]);
    let high_col = column(&["high"]);
    let low_col = column(&["low"]);
    let volume_col = column(&["volume", "traded_quantity"]);

    let mut history = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).filter(|v| !v.is_empty());

        let date = field(Some(date_col))
            .and_then(parse_date)
            .ok_or_else(|| SourceError::Parse {
                row,
                reason: format!("invalid date {:?}", record.get(date_col).unwrap_or("")),
            })?;
        let close = match field(Some(close_col)) {
            Some(raw) => parse_number(raw, row)?,
            None => {
                return Err(SourceError::Parse {
                    row,
                    reason: "missing close".to_string(),
                })
            }
        };
        let or_close = |col: Option<usize>| -> Result<f64, SourceError> {
            field(col).map_or(Ok(close), |raw| parse_number(raw, row))
        };
        let volume = field(volume_col).map_or(Ok(0.0), |raw| parse_number(raw, row))?;

        history.push(PricePoint::new(
            date,
            or_close(open_col)?,
            or_close(high_col)?,
            or_close(low_col)?,
            close,
            volume,
        ));
    }

    history.sort_by_key(|p| p.date);
    history.reverse();
    history.dedup_by_key(|p| p.date);
    history.reverse();
    Ok(history)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split(['T', ' ']).next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(day, format).ok())
}

fn parse_number(raw: &str, row: usize) -> Result<f64, SourceError> {
    raw.replace(',', "")
        .parse::<f64>()
        .map_err(|e| SourceError::Parse {
            row,
            reason: format!("invalid number {raw:?}: {e}"),
        })
}
