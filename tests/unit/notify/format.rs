//! Unit tests for alert rendering and filtering

use crate::test_utils::day;
use chrono::Utc;
use signalwatch::config::{AlertConfig, MessageFormat};
use signalwatch::models::{
    IndicatorName, IndicatorVote, SignalBreakdown, SignalKind, SignalRecord, Vote,
};
use signalwatch::notify::format::{format_detailed, format_medium, format_short, risk_reward};
use signalwatch::notify::{render, should_alert};

fn record(kind: SignalKind) -> SignalRecord {
    SignalRecord {
        symbol: "GBIME".to_string(),
        date: day(0),
        signal_kind: kind,
        strength_percent: 50.0,
        current_price: 450.0,
        support: 435.0,
        resistance: 485.0,
        stop_loss: 427.5,
        target: 494.7,
        risk_reward_ratio: Some(44.7 / 22.5),
        breakdown: SignalBreakdown::from_votes(vec![
            IndicatorVote::new(IndicatorName::Macd, Vote::Buy, "MACD bullish crossover"),
            IndicatorVote::new(IndicatorName::Rsi, Vote::Neutral, "RSI neutral (45.0)"),
        ]),
        generated_at: Utc::now(),
    }
}

#[test]
fn test_short_format() {
    let message = format_short(&record(SignalKind::Buy));
    assert_eq!(
        message,
        "🟢🟢 <b>GBIME</b> - BUY\n💰 ₹450.00 → 🎯 ₹494.70 | 🛑 ₹427.50"
    );
}

#[test]
fn test_medium_format() {
    let message = format_medium(&record(SignalKind::Buy));
    assert!(message.starts_with("🟢🟢 <b>GBIME</b> - BUY (50.0%)"));
    assert!(message.contains("⚖️ <b>Risk/Reward:</b> 1:1.99"));
    assert!(message.contains("📈 <b>Signals:</b> 1 Buy | 0 Sell | 1 Neutral"));
}

#[test]
fn test_detailed_format() {
    let message = format_detailed(&record(SignalKind::Buy));
    assert!(message.contains("📊 <b>Support:</b> ₹435.00 | <b>Resistance:</b> ₹485.00"));
    assert!(message.contains("✅ Buy Signals: 1/2"));
    assert!(message.contains("✅ <b>MACD:</b> MACD bullish crossover"));
    assert!(message.contains("➖ <b>RSI:</b> RSI neutral (45.0)"));
    assert!(message.ends_with("Consider buying near ₹450.00 with stop loss at ₹427.50"));

    let neutral = format_detailed(&record(SignalKind::Neutral));
    assert!(neutral.ends_with("Wait for clearer signals"));
}

#[test]
fn test_portfolio_header() {
    let with = render(&record(SignalKind::Buy), MessageFormat::Short, true);
    assert!(with.starts_with("🚨 <b>YOUR PORTFOLIO ALERT</b> 🚨\n\n"));
    let without = render(&record(SignalKind::Buy), MessageFormat::Short, false);
    assert!(without.starts_with("🟢🟢"));
}

#[test]
fn test_undefined_risk_reward() {
    assert_eq!(risk_reward(None), "n/a");
    assert_eq!(risk_reward(Some(2.0)), "1:2.00");
}

#[test]
fn test_alert_filter() {
    let all = AlertConfig::default();
    assert!(!should_alert(&record(SignalKind::Neutral), &all));
    assert!(should_alert(&record(SignalKind::Buy), &all));
    assert!(should_alert(&record(SignalKind::WeakSell), &all));

    let strong_only = AlertConfig {
        send_only_strong: true,
        ..AlertConfig::default()
    };
    assert!(!should_alert(&record(SignalKind::Buy), &strong_only));
    assert!(should_alert(&record(SignalKind::StrongSell), &strong_only));
}
