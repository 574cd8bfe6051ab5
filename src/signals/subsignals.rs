//! Per-indicator votes. Each function turns the latest (and, where a
//! crossover is involved, the previous) indicator values into BUY, SELL or
//! NEUTRAL plus a one-line reason. Missing values always vote NEUTRAL.

use crate::config::{IndicatorParams, RsiThresholds};
use crate::indicators::momentum::{detect_crossover, CrossoverType};
use crate::indicators::trend::check_ma_cross;
use crate::models::{
    BollingerBand, IndicatorName, IndicatorSnapshot, IndicatorVote, MacdIndicator,
    SupportResistance, Vote,
};

pub fn analyze_macd(
    today: Option<&MacdIndicator>,
    yesterday: Option<&MacdIndicator>,
) -> IndicatorVote {
    let name = IndicatorName::Macd;
    let Some(current) = today else {
        return IndicatorVote::new(name, Vote::Neutral, "MACD warming up (insufficient history)");
    };
    let Some(previous) = yesterday else {
        return IndicatorVote::new(
            name,
            Vote::Neutral,
            format!(
                "MACD: {:.4} vs Signal: {:.4} (no prior value)",
                current.macd, current.signal
            ),
        );
    };

    match detect_crossover(previous, current) {
        CrossoverType::Bullish => IndicatorVote::new(name, Vote::Buy, "MACD bullish crossover"),
        CrossoverType::Bearish => IndicatorVote::new(name, Vote::Sell, "MACD bearish crossover"),
        CrossoverType::None => IndicatorVote::new(
            name,
            Vote::Neutral,
            format!("MACD: {:.4} vs Signal: {:.4}", current.macd, current.signal),
        ),
    }
}

/// Oversold/overbought thresholds are inclusive and take precedence over the
/// midline cross.
pub fn analyze_rsi(
    today: Option<f64>,
    yesterday: Option<f64>,
    thresholds: &RsiThresholds,
) -> IndicatorVote {
    let name = IndicatorName::Rsi;
    let Some(rsi) = today else {
        return IndicatorVote::new(name, Vote::Neutral, "RSI warming up (insufficient history)");
    };

    if rsi <= thresholds.oversold {
        return IndicatorVote::new(name, Vote::Buy, format!("RSI oversold ({:.1})", rsi));
    }
    if rsi >= thresholds.overbought {
        return IndicatorVote::new(name, Vote::Sell, format!("RSI overbought ({:.1})", rsi));
    }

    let mid = thresholds.midline;
    match yesterday {
        Some(prev) if rsi < mid && prev >= mid => IndicatorVote::new(
            name,
            Vote::Sell,
            format!("RSI falling below {:.0} ({:.1})", mid, rsi),
        ),
        Some(prev) if rsi > mid && prev <= mid => IndicatorVote::new(
            name,
            Vote::Buy,
            format!("RSI rising above {:.0} ({:.1})", mid, rsi),
        ),
        _ => IndicatorVote::new(name, Vote::Neutral, format!("RSI neutral ({:.1})", rsi)),
    }
}

pub fn analyze_ma_crossover(
    today: &IndicatorSnapshot,
    yesterday: Option<&IndicatorSnapshot>,
    params: &IndicatorParams,
) -> IndicatorVote {
    let name = IndicatorName::MaCrossover;
    let pair = |s: &IndicatorSnapshot| s.ma_short.zip(s.ma_long);
    let (Some((short_now, long_now)), Some((short_prev, long_prev))) =
        (pair(today), yesterday.and_then(pair))
    else {
        return IndicatorVote::new(name, Vote::Neutral, "Moving averages warming up");
    };

    match check_ma_cross(short_prev, long_prev, short_now, long_now) {
        1 => IndicatorVote::new(
            name,
            Vote::Buy,
            format!("MA{} crossed above MA{}", params.ma_short, params.ma_long),
        ),
        -1 => IndicatorVote::new(
            name,
            Vote::Sell,
            format!("MA{} crossed below MA{}", params.ma_short, params.ma_long),
        ),
        _ => IndicatorVote::new(
            name,
            Vote::Neutral,
            format!("No MA{}/MA{} crossover", params.ma_short, params.ma_long),
        ),
    }
}

pub fn analyze_ma_trend(
    price: f64,
    today: &IndicatorSnapshot,
    params: &IndicatorParams,
) -> IndicatorVote {
    let name = IndicatorName::MaTrend;
    let Some((short, long)) = today.ma_short.zip(today.ma_long) else {
        return IndicatorVote::new(name, Vote::Neutral, "Moving averages warming up");
    };

    if price > short && short > long {
        IndicatorVote::new(
            name,
            Vote::Buy,
            format!("Price above MA{} above MA{}", params.ma_short, params.ma_long),
        )
    } else if price < short && short < long {
        IndicatorVote::new(
            name,
            Vote::Sell,
            format!("Price below MA{} below MA{}", params.ma_short, params.ma_long),
        )
    } else {
        IndicatorVote::new(name, Vote::Neutral, "Mixed moving-average trend")
    }
}

pub fn analyze_bollinger(price: f64, band: Option<&BollingerBand>) -> IndicatorVote {
    let name = IndicatorName::Bollinger;
    let Some(band) = band else {
        return IndicatorVote::new(name, Vote::Neutral, "Bollinger Bands warming up");
    };

    if price <= band.lower {
        IndicatorVote::new(
            name,
            Vote::Buy,
            format!("Price at/below lower band ({:.2})", band.lower),
        )
    } else if price >= band.upper {
        IndicatorVote::new(
            name,
            Vote::Sell,
            format!("Price at/above upper band ({:.2})", band.upper),
        )
    } else {
        IndicatorVote::new(name, Vote::Neutral, "Price inside Bollinger Bands")
    }
}

/// Within `buffer_pct` of support votes BUY, within it of resistance SELL.
pub fn analyze_support_resistance(
    price: f64,
    levels: &SupportResistance,
    buffer_pct: f64,
) -> IndicatorVote {
    let name = IndicatorName::SupportResistance;
    if price <= levels.support * (1.0 + buffer_pct) {
        IndicatorVote::new(
            name,
            Vote::Buy,
            format!("Near support ({:.2})", levels.support),
        )
    } else if price >= levels.resistance * (1.0 - buffer_pct) {
        IndicatorVote::new(
            name,
            Vote::Sell,
            format!("Near resistance ({:.2})", levels.resistance),
        )
    } else {
        IndicatorVote::new(
            name,
            Vote::Neutral,
            format!(
                "Between support {:.2} and resistance {:.2}",
                levels.support, levels.resistance
            ),
        )
    }
}
