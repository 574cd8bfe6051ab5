//! Signal evaluation: per-indicator votes, classification and risk levels.

pub mod classifier;
pub mod crossovers;
pub mod decision;
pub mod engine;
pub mod subsignals;

pub use classifier::{ClassifierInput, SignalClassifier};
pub use crossovers::{all_crossovers, recent_crossovers, CrossoverEvent};
pub use decision::*;
pub use engine::SignalEngine;
