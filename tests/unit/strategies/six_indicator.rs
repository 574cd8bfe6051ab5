//! Vote tally for the six-indicator strategy

use signalwatch::config::{SignalConfig, StrategyKind};
use signalwatch::models::{
    IndicatorName, IndicatorSnapshot, IndicatorVote, SignalBreakdown, SignalKind,
    SupportResistance, Vote,
};
use signalwatch::strategies::{SignalStrategy, Strategy, StrategyInput};

const NAMES: [IndicatorName; 6] = [
    IndicatorName::Macd,
    IndicatorName::Rsi,
    IndicatorName::MaCrossover,
    IndicatorName::MaTrend,
    IndicatorName::Bollinger,
    IndicatorName::SupportResistance,
];

fn tally(buys: usize, sells: usize) -> (SignalKind, f64) {
    tally_with(&SignalConfig::six_indicator(), buys, sells)
}

fn tally_with(config: &SignalConfig, buys: usize, sells: usize) -> (SignalKind, f64) {
    let votes = NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            let vote = if i < buys {
                Vote::Buy
            } else if i < buys + sells {
                Vote::Sell
            } else {
                Vote::Neutral
            };
            IndicatorVote::new(name, vote, "test")
        })
        .collect();
    let strategy = Strategy::from_config(config);
    let result = strategy.aggregate(&SignalBreakdown::from_votes(votes));
    (result.kind, (result.strength_percent * 10.0).round() / 10.0)
}

#[test]
fn test_six_indicator_grades() {
    assert_eq!(tally(5, 1), (SignalKind::StrongBuy, 83.3));
    assert_eq!(tally(4, 0), (SignalKind::StrongBuy, 66.7));
    assert_eq!(tally(3, 1), (SignalKind::Buy, 50.0));
    assert_eq!(tally(2, 0), (SignalKind::WeakBuy, 33.3));
    assert_eq!(tally(1, 0).0, SignalKind::Neutral);
    assert_eq!(tally(0, 4).0, SignalKind::StrongSell);
    assert_eq!(tally(1, 3).0, SignalKind::Sell);
    assert_eq!(tally(0, 2).0, SignalKind::WeakSell);
}

#[test]
fn test_six_indicator_tie_is_neutral() {
    assert_eq!(tally(3, 3).0, SignalKind::Neutral);
    assert_eq!(tally(2, 2).0, SignalKind::Neutral);
}

#[test]
fn test_six_indicator_buy_and_sell_minimums_differ() {
    let mut config = SignalConfig::six_indicator();
    config.votes.buy = 2;
    config.votes.sell = 3;

    assert_eq!(tally_with(&config, 2, 0).0, SignalKind::Buy);
    assert_eq!(tally_with(&config, 0, 2).0, SignalKind::WeakSell);
    assert_eq!(tally_with(&config, 0, 3).0, SignalKind::Sell);
}

#[test]
fn test_six_indicator_subsignals_cover_every_indicator() {
    let strategy = Strategy::from_config(&SignalConfig::six_indicator());
    assert_eq!(strategy.kind(), StrategyKind::SixIndicator);

    let today = IndicatorSnapshot::default().with_rsi(25.0);
    let levels = SupportResistance::new(95.0, 120.0);
    let votes = strategy.compute_subsignals(&StrategyInput {
        current_price: 96.0,
        today: &today,
        yesterday: None,
        levels: &levels,
    });
    let names: Vec<IndicatorName> = votes.iter().map(|v| v.indicator).collect();
    assert_eq!(names, NAMES.to_vec());
    assert_eq!(votes[1].vote, Vote::Buy);
    assert_eq!(votes[5].vote, Vote::Buy);
}
