pub mod engine;
pub mod error;
pub mod validation;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use engine::compute_indicators;
pub use error::IndicatorError;
pub use validation::*;
