//! Concept alias dictionaries for the two recognised statement layouts.
//!
//! These are configuration data: the built-in tables below are only the
//! defaults and callers may replace either dictionary through
//! [`crate::EwsConfig`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::facts::Concept;

/// Concept -> alternate labels (or line codes) recognised for it in one
/// layout. Every alias is tried; the locator decides which row wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptAliasTable(BTreeMap<Concept, Vec<String>>);

impl ConceptAliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ConceptAliasTable::set`].
    pub fn with(mut self, concept: Concept, labels: &[&str]) -> Self {
        self.0
            .insert(concept, labels.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Aliases for `concept`; empty when the layout has no such line.
    pub fn aliases(&self, concept: Concept) -> &[String] {
        self.0.get(&concept).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the alias list for one concept.
    pub fn set(&mut self, concept: Concept, labels: Vec<String>) {
        self.0.insert(concept, labels);
    }

    /// Every alias registered for a concept other than `concept`.
    pub fn labels_except(&self, concept: Concept) -> Vec<String> {
        self.0
            .iter()
            .filter(|(c, _)| **c != concept)
            .flat_map(|(_, labels)| labels.iter().cloned())
            .collect()
    }

    /// Defaults for the international code-based export: a four/five letter
    /// line code in the first column and a description in the second.
    pub fn code_export_default() -> Self {
        Self::new()
            .with(Concept::TotalAssets, &["ATOT", "Total Assets"])
            .with(Concept::TotalCurrentAssets, &["STCA", "Total Current Assets"])
            .with(Concept::TotalCurrentLiabilities, &["SCLT", "Total Current Liabilities"])
            .with(Concept::TotalLiabilities, &["STLB", "Total Liabilities"])
            .with(Concept::TotalFixedAssetsNet, &["STNCA", "Total Fixed Assets - Net"])
            .with(Concept::TangibleFixedAssetsNet, &["SPPE", "Property, Plant & Equipment - Net - Total"])
            .with(Concept::IntangibleFixedAssetsNet, &["SINN", "Intangible Assets - Total - Net"])
            .with(Concept::ShareholdersEquity, &["QTEP", "Shareholders' Equity - Attributable to Parent ShHold - Total", "Shareholders' Equity - Attributable to Parent Shareholders - Total"])
            .with(Concept::RetainedEarnings, &["SRED", "Retained Earnings - Total"])
            .with(Concept::Revenue, &["STLR", "Revenue from Business Activities - Total"])
            .with(Concept::NetIncomeAfterTax, &["SIAT", "Net Income after Tax"])
            .with(Concept::IncomeBeforeTaxes, &["SIBT", "Income before Taxes"])
            .with(Concept::Ebit, &["SEBIT", "Earnings before Interest & Taxes (EBIT)"])
            .with(Concept::InterestExpense, &["SNII", "Interest Expense - Net of (Interest Income)"])
    }

    /// Defaults for Vietnamese statements (labels in the first column).
    pub fn vietnamese_default() -> Self {
        Self::new()
            .with(Concept::TotalAssets, &["TỔNG TÀI SẢN", "TỔNG CỘNG TÀI SẢN", "Tổng cộng tài sản", "Tổng tài sản"])
            .with(Concept::TotalCurrentAssets, &["A. TÀI SẢN NGẮN HẠN", "TÀI SẢN NGẮN HẠN", "A. Tài sản ngắn hạn", "Tài sản ngắn hạn"])
            .with(Concept::TotalCurrentLiabilities, &["I. Nợ ngắn hạn", "Nợ ngắn hạn", "NỢ NGẮN HẠN"])
            .with(Concept::TotalLiabilities, &["C. NỢ PHẢI TRẢ", "NỢ PHẢI TRẢ", "C. Nợ phải trả", "Nợ phải trả", "Tổng nợ phải trả"])
            .with(Concept::TotalFixedAssetsNet, &["II. Tài sản cố định", "Tài sản cố định", "TÀI SẢN CỐ ĐỊNH"])
            .with(Concept::ShareholdersEquity, &["D. VỐN CHỦ SỞ HỮU", "VỐN CHỦ SỞ HỮU", "D. Vốn chủ sở hữu", "Vốn chủ sở hữu", "I. Vốn chủ sở hữu"])
            .with(Concept::RetainedEarnings, &["Lợi nhuận sau thuế chưa phân phối", "11. Lợi nhuận sau thuế chưa phân phối", "LNST chưa phân phối"])
            .with(Concept::TangibleFixedAssetsNet, &["1. Tài sản cố định hữu hình", "Tài sản cố định hữu hình", "TSCĐ hữu hình"])
            .with(Concept::LeasedFixedAssetsNet, &["2. Tài sản cố định thuê tài chính", "Tài sản cố định thuê tài chính", "TSCĐ thuê tài chính"])
            .with(Concept::IntangibleFixedAssetsNet, &["3. Tài sản cố định vô hình", "Tài sản cố định vô hình", "TSCĐ vô hình"])
            .with(Concept::Revenue, &["1. Doanh thu bán hàng và cung cấp dịch vụ", "Doanh thu bán hàng và cung cấp dịch vụ", "Doanh thu thuần", "Doanh thu"])
            .with(Concept::NetIncomeAfterTax, &["18. Lợi nhuận sau thuế", "Lợi nhuận sau thuế", "20. Lợi nhuận sau thuế của công ty mẹ", "LNST"])
            .with(Concept::IncomeBeforeTaxes, &["15. Tổng lợi nhuận kế toán trước thuế", "Tổng lợi nhuận kế toán trước thuế", "Lợi nhuận trước thuế"])
            .with(Concept::Ebit, &["11. Lợi nhuận thuần từ hoạt động kinh doanh", "Lợi nhuận thuần từ hoạt động kinh doanh", "Lợi nhuận từ HĐKD"])
            .with(Concept::InterestExpense, &["- Trong đó: Chi phí lãi vay", "Chi phí lãi vay", "Lãi vay"])
            .with(Concept::FinancialExpenses, &["7. Chi phí tài chính", "Chi phí tài chính", "6. Chi phí tài chính"])
            .with(Concept::FinancialRevenue, &["4. Doanh thu hoạt động tài chính", "Doanh thu hoạt động tài chính", "Doanh thu tài chính", "3. Doanh thu hoạt động tài chính"])
    }
}

/// Sheet-name aliases used to pick the statement tables out of a
/// Vietnamese workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNameAliases {
    pub balance_sheet: Vec<String>,
    pub income_statement: Vec<String>,
}

impl Default for SheetNameAliases {
    fn default() -> Self {
        Self {
            balance_sheet: owned(&[
                "Cân đối kế toán",
                "CĐKT",
                "Balance Sheet",
                "Bảng cân đối kế toán",
            ]),
            income_statement: owned(&[
                "Báo cáo thu nhập",
                "BCKQKD",
                "Kết quả kinh doanh",
                "Income Statement",
                "Báo cáo kết quả kinh doanh",
            ]),
        }
    }
}

impl SheetNameAliases {
    pub fn is_balance_sheet(&self, sheet_name: &str) -> bool {
        names_overlap(&self.balance_sheet, sheet_name)
    }

    pub fn is_income_statement(&self, sheet_name: &str) -> bool {
        names_overlap(&self.income_statement, sheet_name)
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Case-insensitive containment in either direction.
fn names_overlap(aliases: &[String], sheet_name: &str) -> bool {
    let sheet = sheet_name.trim().to_lowercase();
    if sheet.is_empty() {
        return false;
    }
    aliases.iter().any(|alias| {
        let alias = alias.to_lowercase();
        alias.contains(&sheet) || sheet.contains(&alias)
    })
}

/// Both alias dictionaries plus the Vietnamese sheet-name aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasDictionaries {
    pub code_export: ConceptAliasTable,
    pub vietnamese: ConceptAliasTable,
    pub vietnamese_sheets: SheetNameAliases,
}

impl Default for AliasDictionaries {
    fn default() -> Self {
        Self {
            code_export: ConceptAliasTable::code_export_default(),
            vietnamese: ConceptAliasTable::vietnamese_default(),
            vietnamese_sheets: SheetNameAliases::default(),
        }
    }
}
