pub mod csv_source;
pub mod market_data;

pub use csv_source::{parse_history, CsvPriceSource};
pub use market_data::{InMemoryPriceSource, PriceHistorySource, SourceError};
