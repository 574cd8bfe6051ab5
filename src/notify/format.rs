//! Alert message rendering.
//!
//! Messages use Telegram-flavoured HTML (`<b>` only). Prices are rounded to
//! two decimals here and nowhere else.

use crate::config::MessageFormat;
use crate::models::{SignalKind, SignalRecord};
use std::fmt::Write;

const PORTFOLIO_HEADER: &str = "🚨 <b>YOUR PORTFOLIO ALERT</b> 🚨";

pub fn price(value: f64) -> String {
    format!("₹{:.2}", value)
}

pub fn risk_reward(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("1:{:.2}", r),
        None => "n/a".to_string(),
    }
}

fn headline(record: &SignalRecord) -> String {
    format!(
        "{} <b>{}</b> - {}",
        record.signal_kind.emoji(),
        record.symbol,
        record.signal_kind
    )
}

pub fn format_short(record: &SignalRecord) -> String {
    format!(
        "{}\n💰 {} → 🎯 {} | 🛑 {}",
        headline(record),
        price(record.current_price),
        price(record.target),
        price(record.stop_loss)
    )
}

fn price_block(record: &SignalRecord) -> String {
    format!(
        "{} ({:.1}%)\n\n\
         💰 <b>Price:</b> {}\n\
         🎯 <b>Target:</b> {}\n\
         🛑 <b>Stop Loss:</b> {}\n\
         ⚖️ <b>Risk/Reward:</b> {}",
        headline(record),
        record.strength_percent,
        price(record.current_price),
        price(record.target),
        price(record.stop_loss),
        risk_reward(record.risk_reward_ratio)
    )
}

pub fn format_medium(record: &SignalRecord) -> String {
    let b = &record.breakdown;
    format!(
        "{}\n\n📈 <b>Signals:</b> {} Buy | {} Sell | {} Neutral",
        price_block(record),
        b.buy_count,
        b.sell_count,
        b.neutral_count
    )
}

pub fn format_detailed(record: &SignalRecord) -> String {
    let b = &record.breakdown;
    let total = b.total();
    let mut message = price_block(record);

    // write! into a String cannot fail
    let _ = write!(
        message,
        "\n\n📊 <b>Support:</b> {} | <b>Resistance:</b> {}",
        price(record.support),
        price(record.resistance)
    );
    let _ = write!(
        message,
        "\n\n📈 <b>Signal Breakdown:</b>\n\
         ✅ Buy Signals: {}/{total}\n\
         ❌ Sell Signals: {}/{total}\n\
         ➖ Neutral: {}/{total}",
        b.buy_count, b.sell_count, b.neutral_count
    );
    message.push_str("\n\n🔍 <b>Indicator Details:</b>");
    for vote in &b.votes {
        let _ = write!(
            message,
            "\n{} <b>{}:</b> {}",
            vote.vote.icon(),
            vote.indicator,
            vote.reason
        );
    }
    let _ = write!(message, "\n\n💡 <b>Recommendation:</b> {}", recommendation(record));
    message
}

fn recommendation(record: &SignalRecord) -> String {
    match record.signal_kind {
        SignalKind::StrongBuy | SignalKind::Buy => format!(
            "Consider buying near {} with stop loss at {}",
            price(record.current_price),
            price(record.stop_loss)
        ),
        SignalKind::StrongSell | SignalKind::Sell => format!(
            "Consider selling/avoiding, stop loss at {}",
            price(record.stop_loss)
        ),
        _ => "Wait for clearer signals".to_string(),
    }
}

/// Render `record` in `format`, prefixed with the portfolio header when asked.
pub fn render(record: &SignalRecord, format: MessageFormat, portfolio_header: bool) -> String {
    let body = match format {
        MessageFormat::Short => format_short(record),
        MessageFormat::Medium => format_medium(record),
        MessageFormat::Detailed => format_detailed(record),
    };
    if portfolio_header {
        format!("{PORTFOLIO_HEADER}\n\n{body}")
    } else {
        body
    }
}
