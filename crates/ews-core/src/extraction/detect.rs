//! Statement-layout detection, at table level and at workbook level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aliases::SheetNameAliases;
use super::table::{RawTable, Workbook};
use crate::{EwsError, EwsResult};

/// Rows of the first column searched for Vietnamese statement keywords.
const KEYWORD_SCAN_ROWS: usize = 30;

/// Rows searched for a literal "FCC Code" column header.
const HEADER_SCAN_ROWS: usize = 20;

const FCC_CODE_HEADER: &str = "FCC Code";

const VIETNAMESE_KEYWORDS: [&str; 5] = [
    "TÀI SẢN",
    "NỢ PHẢI TRẢ",
    "VỐN CHỦ SỞ HỮU",
    "Doanh thu",
    "Lợi nhuận",
];

/// Lower-cased sheet names that mark a code-based export workbook.
const CODE_EXPORT_SHEET_NAMES: [&str; 3] = ["balance sheet", "income statement", "financial summary"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatConvention {
    /// International export keyed by four/five letter line codes.
    CodeExport,
    /// Vietnamese-language statement layout keyed by line labels.
    VietnameseStatement,
    Unknown,
}

impl std::fmt::Display for FormatConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CodeExport => write!(f, "Code Export"),
            Self::VietnameseStatement => write!(f, "Vietnamese Statement"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table level
// ---------------------------------------------------------------------------

/// Classify a single headerless table.
///
/// 1. Any first-column cell that is exactly four uppercase ASCII letters, or
///    a literal "FCC Code" header cell, means [`FormatConvention::CodeExport`].
/// 2. Otherwise a Vietnamese statement keyword in the first column of the
///    first 30 rows means [`FormatConvention::VietnameseStatement`].
/// 3. Otherwise [`FormatConvention::Unknown`].
pub fn detect_table_format(table: &RawTable) -> FormatConvention {
    let has_line_code = (0..table.height()).any(|r| is_line_code(table.cell(r, 0).text().trim()));
    let has_fcc_header = (0..table.height().min(HEADER_SCAN_ROWS))
        .any(|r| table.row(r).iter().any(|c| c.text().trim() == FCC_CODE_HEADER));
    if has_line_code || has_fcc_header {
        return FormatConvention::CodeExport;
    }

    if has_vietnamese_keywords(table) {
        return FormatConvention::VietnameseStatement;
    }

    FormatConvention::Unknown
}

fn has_vietnamese_keywords(table: &RawTable) -> bool {
    (0..table.height().min(KEYWORD_SCAN_ROWS)).any(|r| {
        let label = table.cell(r, 0).text();
        VIETNAMESE_KEYWORDS.iter().any(|kw| label.contains(kw))
    })
}

fn is_line_code(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// Workbook level
// ---------------------------------------------------------------------------

/// Classify a workbook from its sheet names alone.
pub fn detect_workbook_format(workbook: &Workbook, sheet_aliases: &SheetNameAliases) -> FormatConvention {
    let code_export = workbook.sheet_names().any(|name| {
        let lower = name.trim().to_lowercase();
        CODE_EXPORT_SHEET_NAMES.contains(&lower.as_str())
    });
    if code_export {
        return FormatConvention::CodeExport;
    }

    let vietnamese = workbook
        .sheet_names()
        .any(|name| sheet_aliases.is_balance_sheet(name) || sheet_aliases.is_income_statement(name));
    if vietnamese {
        return FormatConvention::VietnameseStatement;
    }

    FormatConvention::Unknown
}

/// Decide which extraction routine a workbook gets.
///
/// Sheet names are consulted first. When they are inconclusive the first
/// sheet's contents are classified, with Vietnamese keywords taking
/// precedence over line codes since Vietnamese abbreviations ("LNST", "TSCĐ")
/// can look like codes. A table that is still unknown falls back to
/// Vietnamese single-sheet processing unless `strict` is set, in which case
/// it is a structural error.
pub fn resolve_convention(
    workbook: &Workbook,
    sheet_aliases: &SheetNameAliases,
    strict: bool,
) -> EwsResult<FormatConvention> {
    let first = workbook
        .first()
        .ok_or_else(|| EwsError::Structural("workbook contains no sheets".into()))?;

    let by_name = detect_workbook_format(workbook, sheet_aliases);
    if by_name != FormatConvention::Unknown {
        debug!(format = %by_name, "format detected from sheet names");
        return Ok(by_name);
    }

    if has_vietnamese_keywords(first.table()) {
        debug!(sheet = %first.name, "Vietnamese statement keywords found");
        return Ok(FormatConvention::VietnameseStatement);
    }

    match detect_table_format(first.table()) {
        FormatConvention::Unknown if strict => Err(EwsError::Structural(format!(
            "unrecognised statement layout in sheet '{}'",
            first.name
        ))),
        FormatConvention::Unknown => {
            debug!(sheet = %first.name, "layout unknown, falling back to Vietnamese single-sheet processing");
            Ok(FormatConvention::VietnameseStatement)
        }
        detected => {
            debug!(format = %detected, sheet = %first.name, "format detected from table contents");
            Ok(detected)
        }
    }
}
