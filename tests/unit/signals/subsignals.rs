//! Unit tests for per-indicator votes

use signalwatch::config::{IndicatorParams, RsiThresholds};
use signalwatch::models::{
    BollingerBand, IndicatorName, IndicatorSnapshot, MacdIndicator, SupportResistance, Vote,
};
use signalwatch::signals::subsignals::*;

fn macd(macd: f64, signal: f64) -> MacdIndicator {
    MacdIndicator {
        macd,
        signal,
        histogram: macd - signal,
    }
}

#[test]
fn test_macd_crossover_votes() {
    let vote = analyze_macd(Some(&macd(0.5, 0.3)), Some(&macd(0.2, 0.3)));
    assert_eq!(vote.indicator, IndicatorName::Macd);
    assert_eq!(vote.vote, Vote::Buy);
    assert_eq!(vote.reason, "MACD bullish crossover");

    let vote = analyze_macd(Some(&macd(0.1, 0.3)), Some(&macd(0.4, 0.3)));
    assert_eq!(vote.vote, Vote::Sell);
}

#[test]
fn test_macd_state_without_crossover_is_neutral() {
    let vote = analyze_macd(Some(&macd(0.6, 0.3)), Some(&macd(0.5, 0.3)));
    assert_eq!(vote.vote, Vote::Neutral);
}

#[test]
fn test_macd_undefined_is_neutral() {
    assert_eq!(analyze_macd(None, None).vote, Vote::Neutral);
    assert_eq!(analyze_macd(Some(&macd(0.5, 0.3)), None).vote, Vote::Neutral);
    assert_eq!(analyze_macd(None, Some(&macd(0.2, 0.3))).vote, Vote::Neutral);
}

#[test]
fn test_rsi_thresholds_inclusive() {
    let t = RsiThresholds::default();
    assert_eq!(analyze_rsi(Some(30.0), None, &t).vote, Vote::Buy);
    assert_eq!(analyze_rsi(Some(70.0), None, &t).vote, Vote::Sell);
    assert_eq!(analyze_rsi(Some(30.01), None, &t).vote, Vote::Neutral);
    assert_eq!(analyze_rsi(Some(25.0), Some(60.0), &t).reason, "RSI oversold (25.0)");
}

#[test]
fn test_rsi_midline_crosses() {
    let t = RsiThresholds::default();
    let up = analyze_rsi(Some(55.2), Some(48.0), &t);
    assert_eq!(up.vote, Vote::Buy);
    assert_eq!(up.reason, "RSI rising above 50 (55.2)");

    assert_eq!(analyze_rsi(Some(48.0), Some(52.0), &t).vote, Vote::Sell);
    assert_eq!(analyze_rsi(Some(55.0), Some(50.0), &t).vote, Vote::Buy);
    assert_eq!(analyze_rsi(Some(49.0), Some(50.0), &t).vote, Vote::Sell);
    assert_eq!(analyze_rsi(Some(55.0), Some(53.0), &t).vote, Vote::Neutral);
}

#[test]
fn test_rsi_cross_needs_yesterday() {
    let t = RsiThresholds::default();
    assert_eq!(analyze_rsi(Some(55.0), None, &t).vote, Vote::Neutral);
    assert_eq!(analyze_rsi(None, Some(20.0), &t).vote, Vote::Neutral);
}

#[test]
fn test_ma_trend_and_crossover() {
    let params = IndicatorParams::default();
    let today = IndicatorSnapshot::default().with_moving_averages(105.0, 100.0);
    let yesterday = IndicatorSnapshot::default().with_moving_averages(99.0, 100.0);

    assert_eq!(analyze_ma_crossover(&today, Some(&yesterday), &params).vote, Vote::Buy);
    assert_eq!(analyze_ma_crossover(&yesterday, Some(&today), &params).vote, Vote::Sell);
    assert_eq!(analyze_ma_crossover(&today, None, &params).vote, Vote::Neutral);

    let trend = analyze_ma_trend(110.0, &today, &params);
    assert_eq!(trend.vote, Vote::Buy);
    assert_eq!(trend.reason, "Price above MA20 above MA50");
    assert_eq!(analyze_ma_trend(102.0, &today, &params).vote, Vote::Neutral);
}

#[test]
fn test_bollinger_votes() {
    let band = BollingerBand {
        upper: 110.0,
        middle: 100.0,
        lower: 90.0,
    };
    assert_eq!(analyze_bollinger(90.0, Some(&band)).vote, Vote::Buy);
    assert_eq!(analyze_bollinger(111.0, Some(&band)).vote, Vote::Sell);
    assert_eq!(analyze_bollinger(100.0, Some(&band)).vote, Vote::Neutral);
    assert_eq!(analyze_bollinger(100.0, None).vote, Vote::Neutral);
}

#[test]
fn test_support_resistance_proximity() {
    let levels = SupportResistance::new(100.0, 120.0);
    assert_eq!(analyze_support_resistance(101.0, &levels, 0.02).vote, Vote::Buy);
    assert_eq!(analyze_support_resistance(118.0, &levels, 0.02).vote, Vote::Sell);
    assert_eq!(analyze_support_resistance(110.0, &levels, 0.02).vote, Vote::Neutral);
}
