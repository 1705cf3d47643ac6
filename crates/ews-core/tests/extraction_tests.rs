mod common;

use ews_core::extraction::{
    extract_financial_statements, extract_or_report, FormatConvention, RawTable, ScaleFactor,
    Sheet, Workbook,
};
use ews_core::{Concept, EwsConfig, EwsError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Code export
// ===========================================================================

#[test]
fn test_code_export_header_and_years() {
    let result = extract_financial_statements(&common::code_export_workbook(), &EwsConfig::default())
        .unwrap();
    assert!(result.success);
    assert_eq!(result.format, FormatConvention::CodeExport);
    assert_eq!(result.company_info.name, "Acme Industrial");
    assert_eq!(result.company_info.scale_factor, ScaleFactor::Thousands);
    assert_eq!(result.years, vec![2021, 2022]);
    assert!(result.missing_fields.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn test_code_export_values_are_scaled() {
    let result = extract_financial_statements(&common::code_export_workbook(), &EwsConfig::default())
        .unwrap();
    let facts = result.facts(2022).unwrap();
    assert_eq!(facts.get(Concept::TotalAssets), Some(dec!(500_000_000)));
    assert_eq!(facts.get(Concept::TotalLiabilities), Some(dec!(300_000_000)));
    assert_eq!(facts.get(Concept::TotalCurrentAssets), Some(dec!(220_000_000)));
    assert_eq!(facts.get(Concept::TotalCurrentLiabilities), Some(dec!(200_000_000)));
    assert_eq!(facts.get(Concept::Revenue), Some(dec!(620_000_000)));
    assert_eq!(facts.get(Concept::InterestExpense), Some(dec!(8_000_000)));
}

#[test]
fn test_code_export_fallbacks() {
    let result = extract_financial_statements(&common::code_export_workbook(), &EwsConfig::default())
        .unwrap();
    let facts = result.facts(2022).unwrap();
    // PP&E 190,000 + intangibles 10,000
    assert_eq!(facts.get(Concept::TotalFixedAssetsNet), Some(dec!(200_000_000)));
    // Income before taxes 32,000 + interest 8,000
    assert_eq!(facts.get(Concept::Ebit), Some(dec!(40_000_000)));
    // Components feed the total but are not stored
    assert!(!facts.contains(Concept::TangibleFixedAssetsNet));
    assert!(!facts.contains(Concept::IntangibleFixedAssetsNet));
}

#[test]
fn test_duplicate_year_binds_to_first_column() {
    let balance = RawTable::from_rows(vec![
        vec!["Company Name", "Dup Co", "", "", "", "", "", ""],
        vec!["FCC", "Statement Data", "2021", "2022", "", "", "", "2022"],
        vec!["ATOT", "Total Assets", "400", "500", "", "", "", "999"],
    ]);
    let wb = Workbook::new(vec![Sheet::new("Balance Sheet", balance)]);
    let result = extract_financial_statements(&wb, &EwsConfig::default()).unwrap();
    assert_eq!(result.years, vec![2021, 2022]);
    assert_eq!(
        result.facts(2022).unwrap().get(Concept::TotalAssets),
        Some(dec!(500_000))
    );
}

#[test]
fn test_code_export_first_matching_row_wins() {
    // The description of the earlier row contains "Total Assets", so it is
    // claimed before the exact ATOT row.
    let balance = RawTable::from_rows(vec![
        vec!["FCC", "Statement Data", "2022"],
        vec!["SAHS", "Total Assets Held for Sale", "50"],
        vec!["ATOT", "Total Assets", "500"],
        vec!["STLB", "Total Liabilities", "300"],
    ]);
    let wb = Workbook::new(vec![Sheet::new("Balance Sheet", balance)]);
    let result = extract_financial_statements(&wb, &EwsConfig::default()).unwrap();
    let facts = result.facts(2022).unwrap();
    assert_eq!(facts.get(Concept::TotalAssets), Some(dec!(50_000)));
    assert_eq!(facts.get(Concept::TotalLiabilities), Some(dec!(300_000)));
}

#[test]
fn test_income_lines_fall_back_to_balance_sheet() {
    let balance = RawTable::from_rows(vec![
        vec!["Scaling", "Millions"],
        vec!["FCC", "Statement Data", "2023"],
        vec!["ATOT", "Total Assets", "10"],
        vec!["SIAT", "Net Income after Tax", "1"],
    ]);
    let wb = Workbook::new(vec![Sheet::new("Balance Sheet", balance)]);
    let result = extract_financial_statements(&wb, &EwsConfig::default()).unwrap();
    let facts = result.facts(2023).unwrap();
    assert_eq!(facts.get(Concept::NetIncomeAfterTax), Some(dec!(1_000_000)));
    assert_eq!(result.company_info.name, "Unknown Company");
}

// ===========================================================================
// Vietnamese statements
// ===========================================================================

#[test]
fn test_vietnamese_header() {
    let result = extract_financial_statements(&common::vietnamese_workbook(), &EwsConfig::default())
        .unwrap();
    assert_eq!(result.format, FormatConvention::VietnameseStatement);
    assert_eq!(result.company_info.name, "CÔNG TY CỔ PHẦN THÉP NAM VIỆT");
    assert_eq!(result.company_info.scale_factor, ScaleFactor::Thousands);
    assert_eq!(result.years, vec![2021, 2022]);
    assert!(result.success);
}

#[test]
fn test_vietnamese_interest_and_ebit_derivation() {
    let result = extract_financial_statements(&common::vietnamese_workbook(), &EwsConfig::default())
        .unwrap();
    let facts = result.facts(2021).unwrap();
    assert_eq!(facts.get(Concept::FinancialExpenses), Some(dec!(20_000)));
    assert_eq!(facts.get(Concept::FinancialRevenue), Some(dec!(5_000)));
    assert_eq!(facts.get(Concept::InterestExpense), Some(dec!(15_000)));
    assert_eq!(facts.get(Concept::Ebit), Some(dec!(65_000)));

    let later = result.facts(2022).unwrap();
    assert_eq!(later.get(Concept::InterestExpense), Some(dec!(25_000)));
    assert_eq!(later.get(Concept::Ebit), Some(dec!(5_000)));
}

#[test]
fn test_vietnamese_fixed_assets_from_components() {
    let result = extract_financial_statements(&common::vietnamese_workbook(), &EwsConfig::default())
        .unwrap();
    // The component rows must not be mistaken for the total line.
    assert_eq!(
        result.facts(2021).unwrap().get(Concept::TotalFixedAssetsNet),
        Some(dec!(150_000))
    );
    assert_eq!(
        result.facts(2022).unwrap().get(Concept::TotalFixedAssetsNet),
        Some(dec!(150_000))
    );
}

#[test]
fn test_vietnamese_balance_sheet_lines() {
    let result = extract_financial_statements(&common::vietnamese_workbook(), &EwsConfig::default())
        .unwrap();
    let facts = result.facts(2022).unwrap();
    assert_eq!(facts.get(Concept::TotalAssets), Some(dec!(1_100_000)));
    assert_eq!(facts.get(Concept::TotalCurrentAssets), Some(dec!(320_000)));
    assert_eq!(facts.get(Concept::TotalCurrentLiabilities), Some(dec!(400_000)));
    assert_eq!(facts.get(Concept::TotalLiabilities), Some(dec!(700_000)));
    assert_eq!(facts.get(Concept::ShareholdersEquity), Some(dec!(400_000)));
    assert_eq!(facts.get(Concept::RetainedEarnings), Some(dec!(60_000)));
    assert_eq!(facts.get(Concept::NetIncomeAfterTax), Some(dec!(-25_000)));
}

// ===========================================================================
// Detection, completeness and failure modes
// ===========================================================================

#[test]
fn test_extraction_is_idempotent() {
    let wb = common::vietnamese_workbook();
    let config = EwsConfig::default();
    let first = extract_financial_statements(&wb, &config).unwrap();
    let second = extract_financial_statements(&wb, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_layout_falls_back_to_vietnamese() {
    let result =
        extract_financial_statements(&common::unlabelled_workbook(), &EwsConfig::default()).unwrap();
    assert_eq!(result.format, FormatConvention::VietnameseStatement);
    assert_eq!(result.years, vec![2022]);
    assert!(!result.success);
    assert_eq!(result.missing_fields.len(), 7);
}

#[test]
fn test_unknown_layout_is_rejected_when_strict() {
    let config = EwsConfig {
        strict_detection: true,
        ..EwsConfig::default()
    };
    let err = extract_financial_statements(&common::unlabelled_workbook(), &config).unwrap_err();
    assert!(matches!(err, EwsError::Structural(_)));
}

#[test]
fn test_completeness_threshold() {
    // Four of seven required concepts present: three missing is under half.
    let table = RawTable::from_rows(vec![
        vec!["Chỉ tiêu", "2024"],
        vec!["TỔNG CỘNG TÀI SẢN", "100"],
        vec!["A. TÀI SẢN NGẮN HẠN", "40"],
        vec!["I. Nợ ngắn hạn", "30"],
        vec!["C. NỢ PHẢI TRẢ", "60"],
    ]);
    let wb = Workbook::new(vec![Sheet::new("Cân đối kế toán", table)]);
    let result = extract_financial_statements(&wb, &EwsConfig::default()).unwrap();
    assert!(result.success);
    assert_eq!(
        result.missing_fields,
        vec![
            Concept::ShareholdersEquity,
            Concept::NetIncomeAfterTax,
            Concept::Revenue
        ]
    );

    let strict = EwsConfig {
        completeness_threshold: dec!(0.25),
        ..EwsConfig::default()
    };
    assert!(!extract_financial_statements(&wb, &strict).unwrap().success);
}

#[test]
fn test_empty_workbook_is_structural() {
    let err = extract_financial_statements(&Workbook::new(Vec::new()), &EwsConfig::default())
        .unwrap_err();
    assert!(matches!(err, EwsError::Structural(_)));
}

#[test]
fn test_missing_year_header_is_structural() {
    let table = RawTable::from_rows(vec![vec!["TỔNG CỘNG TÀI SẢN", "100"]]);
    let wb = Workbook::new(vec![Sheet::new("CĐKT", table)]);
    let err = extract_financial_statements(&wb, &EwsConfig::default()).unwrap_err();
    assert!(matches!(err, EwsError::Structural(_)));
}

#[test]
fn test_extract_or_report_folds_errors() {
    let result = extract_or_report(&Workbook::new(Vec::new()), &EwsConfig::default());
    assert!(!result.success);
    assert_eq!(result.format, FormatConvention::Unknown);
    assert_eq!(result.errors.len(), 1);
    assert!(result.facts_by_year.is_empty());
}

#[test]
fn test_invalid_threshold_is_rejected() {
    let config = EwsConfig {
        completeness_threshold: dec!(0),
        ..EwsConfig::default()
    };
    let err =
        extract_financial_statements(&common::vietnamese_workbook(), &config).unwrap_err();
    assert!(matches!(err, EwsError::InvalidInput { .. }));
}
