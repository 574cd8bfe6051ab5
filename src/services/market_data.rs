//! Price history sources.

use crate::models::PricePoint;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no price history for {0}")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed price data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {reason}")]
    Parse { row: usize, reason: String },
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Daily price history for a symbol, ordered oldest first.
#[async_trait]
pub trait PriceHistorySource {
    async fn get_history(&self, symbol: &str) -> Result<Vec<PricePoint>, SourceError>;
}

/// Fixed histories held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    histories: HashMap<String, Vec<PricePoint>>,
}

impl InMemoryPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, symbol: impl Into<String>, history: Vec<PricePoint>) -> Self {
        self.insert(symbol, history);
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, history: Vec<PricePoint>) {
        self.histories.insert(symbol.into(), history);
    }
}

#[async_trait]
impl PriceHistorySource for InMemoryPriceSource {
    async fn get_history(&self, symbol: &str) -> Result<Vec<PricePoint>, SourceError> {
        self.histories
            .get(symbol)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(symbol.to_string()))
    }
}
