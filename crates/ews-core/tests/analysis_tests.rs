mod common;

use ews_core::analysis::{analyze_workbook, analyze_year};
use ews_core::extraction::extract_financial_statements;
use ews_core::scoring::benchmark::{MarketBenchmarks, RelativePosition};
use ews_core::scoring::signals::EwsLevel;
use ews_core::scoring::trend::RiskTrend;
use ews_core::{EwsConfig, EwsError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Latest year
// ===========================================================================

#[test]
fn test_latest_year_is_distress_and_worsening() {
    let output =
        analyze_workbook(&common::vietnamese_workbook(), None, &EwsConfig::default()).unwrap();
    let a = &output.result;
    assert_eq!(a.year, 2022);
    assert_eq!(a.years, vec![2021, 2022]);
    assert_eq!(a.signals.n_signals, 3);
    assert_eq!(a.signals.ews_level, EwsLevel::Distress);
    assert!(a.priority_flag);

    assert_eq!(a.trend.previous_year, Some(2021));
    assert_eq!(a.trend.risk_trend, RiskTrend::Worsening);
    assert_eq!(a.trend.signal_delta, 2);
    assert!(a.trend.ebit_yoy_pct.unwrap() < Decimal::ZERO);
}

#[test]
fn test_signal_trend_covers_every_year() {
    let output =
        analyze_workbook(&common::vietnamese_workbook(), None, &EwsConfig::default()).unwrap();
    let points = &output.result.signal_trend;
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].year, 2021);
    assert_eq!(points[0].n_signals, 1);
    assert_eq!(points[0].ews_level, EwsLevel::Watchlist);
    assert_eq!(points[1].year, 2022);
    assert_eq!(points[1].ews_level, EwsLevel::Distress);
    assert_eq!(points[0].lev, Some(dec!(0.6)));
}

#[test]
fn test_market_comparison() {
    let output =
        analyze_workbook(&common::vietnamese_workbook(), None, &EwsConfig::default()).unwrap();
    let rows = &output.result.benchmarks;
    let positions: Vec<RelativePosition> = rows.iter().map(|r| r.relative_position).collect();
    assert_eq!(
        positions,
        vec![
            RelativePosition::BelowMedian,
            RelativePosition::BelowMedian,
            RelativePosition::HigherThanMedian,
            RelativePosition::LowerThanMedian,
            RelativePosition::BelowMedian,
        ]
    );
    assert_eq!(rows[2].market_median, Some(dec!(0.454609)));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_report_text() {
    let output =
        analyze_workbook(&common::vietnamese_workbook(), None, &EwsConfig::default()).unwrap();
    let report = &output.result.report;
    assert!(report.headline.contains("serious financial difficulties"));
    assert!(report.executive_summary.ends_with(
        " The primary concerns include: EBIT lower than Interest Expense - Weak interest \
         coverage; Altman Z-Score = 0.33 - Financial distress zone."
    ));
    assert!(report
        .year_summary
        .starts_with("In 2022, the company shows a high level of financial risk"));
    assert!(report
        .year_summary
        .ends_with("3 warning signal(s) triggered. Appropriate risk management measures are required."));
    assert_eq!(report.recommendations[0], "WARNING: The company shows strong signs of financial distress.");
    assert_eq!(
        report.coverage_summary,
        "The firm cannot cover interest payments from operating earnings."
    );
}

// ===========================================================================
// Selected earlier year
// ===========================================================================

#[test]
fn test_first_year_has_no_trend() {
    let output = analyze_workbook(&common::vietnamese_workbook(), Some(2021), &EwsConfig::default())
        .unwrap();
    let a = &output.result;
    assert_eq!(a.signals.ews_level, EwsLevel::Watchlist);
    assert_eq!(a.signals.signal_s, 1);
    assert_eq!(a.trend.previous_year, None);
    assert_eq!(a.trend.risk_trend, RiskTrend::Stable);
    assert!(a
        .report
        .executive_summary
        .starts_with("Based on the uploaded financial statements, the firm is classified under the Watchlist category."));
    assert!(a
        .report
        .year_summary
        .contains("Altman Z-Score = 2.05 is in the grey zone, monitoring required."));
}

#[test]
fn test_code_export_workbook_analyses() {
    let output =
        analyze_workbook(&common::code_export_workbook(), None, &EwsConfig::default()).unwrap();
    let a = &output.result;
    assert_eq!(a.company.name, "Acme Industrial");
    assert_eq!(a.ratios.lev, Some(dec!(0.6)));
    assert_eq!(a.ratios.roa, Some(dec!(0.05)));
    assert_eq!(a.ratios.cur, Some(dec!(1.1)));
    // 2022: EBIT 40m covers interest 8m
    assert_eq!(a.signals.signal_ebit, 0);
}

// ===========================================================================
// Failure modes
// ===========================================================================

#[test]
fn test_unknown_year_rejected() {
    let err = analyze_workbook(&common::vietnamese_workbook(), Some(2019), &EwsConfig::default())
        .unwrap_err();
    assert!(matches!(err, EwsError::InsufficientData(_)));
}

#[test]
fn test_incomplete_extraction_is_not_scored() {
    let config = EwsConfig::default();
    let extraction = extract_financial_statements(&common::unlabelled_workbook(), &config).unwrap();
    assert!(!extraction.success);
    let err = analyze_year(&extraction, 2022, &config).unwrap_err();
    assert!(matches!(err, EwsError::InsufficientData(_)));
}

#[test]
fn test_missing_medians_warn() {
    let config = EwsConfig {
        benchmarks: MarketBenchmarks::empty(),
        ..EwsConfig::default()
    };
    let output = analyze_workbook(&common::vietnamese_workbook(), None, &config).unwrap();
    assert_eq!(output.warnings, vec!["No market medians available for 2022.".to_string()]);
    assert!(output
        .result
        .benchmarks
        .iter()
        .all(|r| r.relative_position == RelativePosition::NotAvailable));
}
