use rust_decimal::Decimal;

use super::aliases::{AliasDictionaries, ConceptAliasTable, SheetNameAliases};
use super::detect::FormatConvention;
use super::header::{self, CompanyInfo, YearColumnMap};
use super::locate;
use super::table::{RawTable, Sheet, Workbook};
use crate::facts::Concept;

const BALANCE_SHEET_CONCEPTS: [Concept; 7] = [
    Concept::TotalAssets,
    Concept::TotalCurrentAssets,
    Concept::TotalCurrentLiabilities,
    Concept::TotalLiabilities,
    Concept::TotalFixedAssetsNet,
    Concept::ShareholdersEquity,
    Concept::RetainedEarnings,
];

const CODE_EXPORT_INCOME_CONCEPTS: [Concept; 5] = [
    Concept::Revenue,
    Concept::NetIncomeAfterTax,
    Concept::IncomeBeforeTaxes,
    Concept::Ebit,
    Concept::InterestExpense,
];

const VIETNAMESE_INCOME_CONCEPTS: [Concept; 7] = [
    Concept::Revenue,
    Concept::NetIncomeAfterTax,
    Concept::IncomeBeforeTaxes,
    Concept::Ebit,
    Concept::InterestExpense,
    Concept::FinancialExpenses,
    Concept::FinancialRevenue,
];

const CODE_EXPORT_FIXED_ASSET_COMPONENTS: [Concept; 2] = [
    Concept::TangibleFixedAssetsNet,
    Concept::IntangibleFixedAssetsNet,
];

const VIETNAMESE_FIXED_ASSET_COMPONENTS: [Concept; 3] = [
    Concept::TangibleFixedAssetsNet,
    Concept::LeasedFixedAssetsNet,
    Concept::IntangibleFixedAssetsNet,
];

/// The statement tables picked out of a workbook.
#[derive(Debug, Clone, Copy)]
pub struct StatementSheets<'w> {
    pub balance_sheet: &'w Sheet,
    pub income_statement: Option<&'w Sheet>,
}

impl<'w> StatementSheets<'w> {
    /// Table the income-statement concepts are read from: the dedicated
    /// sheet when there is one, the balance sheet otherwise.
    pub fn income_source(&self) -> &'w Sheet {
        self.income_statement.unwrap_or(self.balance_sheet)
    }
}

/// One recognised statement layout together with the alias data it reads
/// with. Every layout-specific decision in the extractor goes through here.
#[derive(Debug, Clone, Copy)]
pub enum StatementConvention<'a> {
    CodeExport {
        aliases: &'a ConceptAliasTable,
    },
    Vietnamese {
        aliases: &'a ConceptAliasTable,
        sheets: &'a SheetNameAliases,
    },
}

impl<'a> StatementConvention<'a> {
    /// `None` for [`FormatConvention::Unknown`].
    pub fn for_format(format: FormatConvention, dicts: &'a AliasDictionaries) -> Option<Self> {
        match format {
            FormatConvention::CodeExport => Some(Self::CodeExport {
                aliases: &dicts.code_export,
            }),
            FormatConvention::VietnameseStatement => Some(Self::Vietnamese {
                aliases: &dicts.vietnamese,
                sheets: &dicts.vietnamese_sheets,
            }),
            FormatConvention::Unknown => None,
        }
    }

    pub fn format(&self) -> FormatConvention {
        match self {
            Self::CodeExport { .. } => FormatConvention::CodeExport,
            Self::Vietnamese { .. } => FormatConvention::VietnameseStatement,
        }
    }

    pub fn aliases(&self) -> &'a ConceptAliasTable {
        match *self {
            Self::CodeExport { aliases } => aliases,
            Self::Vietnamese { aliases, .. } => aliases,
        }
    }

    /// Raw (unscaled) value of `concept` in the given year column.
    pub fn locate(&self, table: &RawTable, concept: Concept, year_col: usize) -> Option<Decimal> {
        let aliases = self.aliases().aliases(concept);
        match self {
            Self::CodeExport { .. } => locate::locate_code_export(table, aliases, year_col),
            Self::Vietnamese { .. } => {
                let reserved = self.aliases().labels_except(concept);
                locate::locate_vietnamese(table, aliases, &reserved, year_col)
            }
        }
    }

    pub fn resolve_header(&self, table: &RawTable) -> (CompanyInfo, YearColumnMap) {
        match self {
            Self::CodeExport { .. } => (
                header::resolve_code_export_header(table),
                header::code_export_year_columns(table),
            ),
            Self::Vietnamese { .. } => (
                header::resolve_vietnamese_header(table),
                header::vietnamese_year_columns(table),
            ),
        }
    }

    /// Pick the balance-sheet and income-statement tables. The balance sheet
    /// defaults to the first sheet; `None` only for an empty workbook.
    pub fn select_sheets<'w>(&self, workbook: &'w Workbook) -> Option<StatementSheets<'w>> {
        let first = workbook.first()?;
        let (balance, income) = match self {
            Self::CodeExport { .. } => (
                workbook.find(|name| name.to_lowercase().contains("balance")),
                workbook.find(|name| name.to_lowercase().contains("income")),
            ),
            Self::Vietnamese { sheets, .. } => (
                workbook.find(|name| sheets.is_balance_sheet(name)),
                workbook.find(|name| !sheets.is_balance_sheet(name) && sheets.is_income_statement(name)),
            ),
        };
        Some(StatementSheets {
            balance_sheet: balance.unwrap_or(first),
            income_statement: income,
        })
    }

    pub fn balance_sheet_concepts(&self) -> &'static [Concept] {
        &BALANCE_SHEET_CONCEPTS
    }

    pub fn income_statement_concepts(&self) -> &'static [Concept] {
        match self {
            Self::CodeExport { .. } => &CODE_EXPORT_INCOME_CONCEPTS,
            Self::Vietnamese { .. } => &VIETNAMESE_INCOME_CONCEPTS,
        }
    }

    /// Lines summed into Total Fixed Assets - Net when the total itself is
    /// not reported.
    pub fn fixed_asset_components(&self) -> &'static [Concept] {
        match self {
            Self::CodeExport { .. } => &CODE_EXPORT_FIXED_ASSET_COMPONENTS,
            Self::Vietnamese { .. } => &VIETNAMESE_FIXED_ASSET_COMPONENTS,
        }
    }

    /// Whether Interest Expense may be derived from financial expenses less
    /// financial revenue.
    pub fn derives_interest_expense(&self) -> bool {
        matches!(self, Self::Vietnamese { .. })
    }
}
