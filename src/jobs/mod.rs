//! Per-symbol evaluation jobs

pub mod context;
pub mod handlers;
pub mod types;

pub use context::JobContext;
pub use handlers::{handle_evaluate_symbol, JobError};
pub use types::{EvaluateSymbolJob, JobOutcome};
