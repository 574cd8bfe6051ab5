//! Daily stock signal notifier: MACD/RSI indicators, signal classification
//! and risk parameters for a configured list of equities.

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod services;
pub mod signals;
pub mod strategies;
