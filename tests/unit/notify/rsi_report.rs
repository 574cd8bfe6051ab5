//! Unit tests for the RSI portfolio report

use crate::test_utils::day;
use signalwatch::config::RsiThresholds;
use signalwatch::indicators::momentum::RsiZone;
use signalwatch::notify::{RsiReport, RsiStatus};

fn status(symbol: &str, rsi: f64, portfolio: bool) -> RsiStatus {
    RsiStatus::new(symbol, rsi, 100.0, day(0), &RsiThresholds::default(), portfolio)
}

#[test]
fn test_report_sections() {
    let statuses = vec![
        status("NABIL", 28.0, true),
        status("GBIME", 75.0, true),
        status("NICA", 50.0, true),
        status("HIDCL", 33.0, false),
        status("UPPER", 20.0, false),
        status("SANIMA", 60.0, false),
    ];
    let report = RsiReport::build(&statuses, 35.0);

    assert_eq!(report.portfolio.len(), 3);
    assert_eq!(report.count(RsiZone::Oversold), 1);
    assert_eq!(report.count(RsiZone::Overbought), 1);
    assert_eq!(report.count(RsiZone::Neutral), 1);

    let watch: Vec<&str> = report.low_rsi_watch.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(watch, vec!["UPPER", "HIDCL"]);

    let text = report.render();
    assert!(text.contains("<b>NABIL</b>: RSI 28.0 - OVERSOLD"));
    assert!(text.contains("💡 Consider taking profits"));
    assert!(text.contains("• UPPER: RSI 20.0"));
    assert!(!text.contains("SANIMA"));
}

#[test]
fn test_empty_report() {
    let report = RsiReport::build(&[status("SANIMA", 60.0, false)], 35.0);
    assert!(report.is_empty());
}
