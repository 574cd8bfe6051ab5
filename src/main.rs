//! Analyse a single price CSV and print the detailed signal message.
//!
//! Usage: `signalwatch <prices.csv> [SYMBOL]`

use dotenvy::dotenv;
use signalwatch::config::{Config, MessageFormat};
use signalwatch::logging;
use signalwatch::notify;
use signalwatch::services::parse_history;
use signalwatch::signals::{recent_crossovers, SignalEngine};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(&config.environment);

    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: signalwatch <prices.csv> [SYMBOL]")?;
    let symbol = args.next().unwrap_or_else(|| {
        Path::new(&path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "UNKNOWN".to_string())
    });

    let bytes = tokio::fs::read(&path).await?;
    let history = parse_history(&bytes)?;
    let history = match config.signal_date {
        Some(date) => signalwatch::signals::engine::truncate_to(&history, date),
        None => &history[..],
    };

    let (record, series) =
        SignalEngine::evaluate_with_indicators(&symbol, history, &config.signal)?;
    println!(
        "{}",
        notify::render(&record, MessageFormat::Detailed, config.is_portfolio(&symbol))
    );

    let crossovers = recent_crossovers(history, &series, config.recent_signals_days);
    if !crossovers.is_empty() {
        println!("\nRecent MACD crossovers:");
        for event in crossovers {
            println!(
                "  {} {:?} (MACD {:.4}, signal {:.4}, close {:.2})",
                event.date, event.crossover, event.macd, event.signal, event.close
            );
        }
    }
    Ok(())
}
