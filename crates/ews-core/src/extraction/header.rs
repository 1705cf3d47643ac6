//! Company name, reporting unit and year-column discovery.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

use super::table::RawTable;
use crate::types::FiscalYear;

/// Rows x columns of the header block searched for name and unit cells.
const HEADER_SCAN_ROWS: usize = 15;
const HEADER_SCAN_COLS: usize = 5;

/// Rows searched for the code-export year marker row.
const YEAR_MARKER_SCAN_ROWS: usize = 20;
/// Year cells on the code-export marker row start after code + description.
const CODE_EXPORT_FIRST_YEAR_COL: usize = 2;
const YEAR_MARKERS: [&str; 2] = ["Statement Data", "FCC"];

/// Rows of a Vietnamese statement searched for year headers.
const VIETNAMESE_YEAR_SCAN_ROWS: usize = 10;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";

// ---------------------------------------------------------------------------
// Scale factor
// ---------------------------------------------------------------------------

/// Reporting unit of a statement. Serialized as its multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum ScaleFactor {
    Units,
    #[default]
    Thousands,
    Millions,
    Billions,
}

impl ScaleFactor {
    pub fn multiplier(self) -> Decimal {
        Decimal::from(u64::from(self))
    }

    /// Reading of the text next to a "Scaling" label. Text naming none of
    /// the known units means values are already in base units.
    pub fn from_scaling_label(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("thousand") {
            ScaleFactor::Thousands
        } else if lower.contains("million") {
            ScaleFactor::Millions
        } else if lower.contains("billion") {
            ScaleFactor::Billions
        } else {
            ScaleFactor::Units
        }
    }

    /// Vietnamese unit phrase ("Đơn vị tính: triệu đồng") found in `text`,
    /// accented or not.
    pub fn from_vietnamese_phrase(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("nghìn đồng") || lower.contains("nghin dong") {
            Some(ScaleFactor::Thousands)
        } else if lower.contains("triệu đồng") || lower.contains("trieu dong") {
            Some(ScaleFactor::Millions)
        } else if lower.contains("tỷ đồng") || lower.contains("ty dong") {
            Some(ScaleFactor::Billions)
        } else {
            None
        }
    }
}

impl From<ScaleFactor> for u64 {
    fn from(s: ScaleFactor) -> u64 {
        match s {
            ScaleFactor::Units => 1,
            ScaleFactor::Thousands => 1_000,
            ScaleFactor::Millions => 1_000_000,
            ScaleFactor::Billions => 1_000_000_000,
        }
    }
}

impl TryFrom<u64> for ScaleFactor {
    type Error = String;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(ScaleFactor::Units),
            1_000 => Ok(ScaleFactor::Thousands),
            1_000_000 => Ok(ScaleFactor::Millions),
            1_000_000_000 => Ok(ScaleFactor::Billions),
            other => Err(format!("unsupported scale factor {other}")),
        }
    }
}

impl std::fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleFactor::Units => write!(f, "Units"),
            ScaleFactor::Thousands => write!(f, "Thousands"),
            ScaleFactor::Millions => write!(f, "Millions"),
            ScaleFactor::Billions => write!(f, "Billions"),
        }
    }
}

// ---------------------------------------------------------------------------
// Header records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub scale_factor: ScaleFactor,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: UNKNOWN_COMPANY.to_string(),
            scale_factor: ScaleFactor::Thousands,
        }
    }
}

/// Fiscal year -> column index. Each year is bound to the first column it
/// was seen in; later duplicates (variance or percentage columns) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearColumnMap(BTreeMap<FiscalYear, usize>);

impl YearColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `year` to `col` unless the year is already bound. Returns
    /// whether the binding was made.
    pub fn insert_first(&mut self, year: FiscalYear, col: usize) -> bool {
        if self.0.contains_key(&year) {
            return false;
        }
        self.0.insert(year, col);
        true
    }

    pub fn column(&self, year: FiscalYear) -> Option<usize> {
        self.0.get(&year).copied()
    }

    /// Years in ascending order.
    pub fn years(&self) -> Vec<FiscalYear> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FiscalYear, usize)> + '_ {
        self.0.iter().map(|(y, c)| (*y, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn header_cells(table: &RawTable) -> impl Iterator<Item = (usize, usize)> + '_ {
    let rows = table.height().min(HEADER_SCAN_ROWS);
    let cols = table.width().min(HEADER_SCAN_COLS);
    (0..rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
}

// ---------------------------------------------------------------------------
// Code export
// ---------------------------------------------------------------------------

/// Company name from the first "Company Name" label; scale from the text
/// next to a "Scaling" label (the last one wins). Defaults to
/// [`UNKNOWN_COMPANY`] and thousands.
pub fn resolve_code_export_header(table: &RawTable) -> CompanyInfo {
    let mut info = CompanyInfo::default();
    let mut named = false;

    for (r, c) in header_cells(table) {
        let label = table.cell(r, c).text();
        if !named && label.contains("Company Name") {
            let name = table.cell(r, c + 1).text();
            let name = name.trim();
            if !name.is_empty() {
                info.name = name.to_string();
                named = true;
            }
        }
        if label.contains("Scaling") {
            info.scale_factor = ScaleFactor::from_scaling_label(&table.cell(r, c + 1).text());
        }
    }

    trace!(company = %info.name, scale = %info.scale_factor, "code export header resolved");
    info
}

/// Years on the first row (within the first 20) carrying a "Statement Data"
/// or "FCC" marker cell, read left to right from the third column.
pub fn code_export_year_columns(table: &RawTable) -> YearColumnMap {
    let mut years = YearColumnMap::new();

    let marker_row = (0..table.height().min(YEAR_MARKER_SCAN_ROWS)).find(|&r| {
        table
            .row(r)
            .iter()
            .any(|cell| YEAR_MARKERS.contains(&cell.text().trim()))
    });

    if let Some(r) = marker_row {
        for (c, cell) in table.row(r).iter().enumerate().skip(CODE_EXPORT_FIRST_YEAR_COL) {
            if let Some(year) = cell.as_fiscal_year() {
                years.insert_first(year, c);
            }
        }
    }

    years
}

// ---------------------------------------------------------------------------
// Vietnamese statement
// ---------------------------------------------------------------------------

/// Company name from the first cell mentioning "CÔNG TY" / "COMPANY",
/// truncated at the first line break and then at the first hyphen. Scale
/// from the last unit phrase in the header block.
pub fn resolve_vietnamese_header(table: &RawTable) -> CompanyInfo {
    let mut info = CompanyInfo::default();
    let mut named = false;

    for (r, c) in header_cells(table) {
        let text = table.cell(r, c).text();
        if !named {
            if let Some(name) = vietnamese_company_name(&text) {
                info.name = name;
                named = true;
            }
        }
        if let Some(scale) = ScaleFactor::from_vietnamese_phrase(&text) {
            info.scale_factor = scale;
        }
    }

    trace!(company = %info.name, scale = %info.scale_factor, "vietnamese header resolved");
    info
}

fn vietnamese_company_name(text: &str) -> Option<String> {
    let upper = text.to_uppercase();
    if !upper.contains("CÔNG TY") && !upper.contains("COMPANY") {
        return None;
    }
    let first_line = text.split('\n').next().unwrap_or_default();
    let name = first_line.split('-').next().unwrap_or_default().trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Years found anywhere in the first 10 rows, scanned row by row and left
/// to right; the first column seen for a year wins.
pub fn vietnamese_year_columns(table: &RawTable) -> YearColumnMap {
    let mut years = YearColumnMap::new();
    for r in 0..table.height().min(VIETNAMESE_YEAR_SCAN_ROWS) {
        for (c, cell) in table.row(r).iter().enumerate() {
            if let Some(year) = cell.as_fiscal_year() {
                years.insert_first(year, c);
            }
        }
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_scale_factor_serializes_as_multiplier() {
        assert_eq!(serde_json::to_string(&ScaleFactor::Millions).unwrap(), "1000000");
        let back: ScaleFactor = serde_json::from_str("1000").unwrap();
        assert_eq!(back, ScaleFactor::Thousands);
        assert!(serde_json::from_str::<ScaleFactor>("10").is_err());
        assert_eq!(ScaleFactor::Billions.multiplier(), dec!(1000000000));
    }

    #[test]
    fn test_code_export_header() {
        let t = RawTable::from_rows(vec![
            vec!["Company Name", "Acme Industrial Corp "],
            vec!["Scaling", "Millions"],
        ]);
        let info = resolve_code_export_header(&t);
        assert_eq!(info.name, "Acme Industrial Corp");
        assert_eq!(info.scale_factor, ScaleFactor::Millions);
    }

    #[test]
    fn test_code_export_unlabelled_scaling_is_units() {
        let t = RawTable::from_rows(vec![vec!["Scaling", "As reported"]]);
        assert_eq!(resolve_code_export_header(&t).scale_factor, ScaleFactor::Units);
    }

    #[test]
    fn test_header_defaults() {
        let t = RawTable::from_rows(vec![vec!["nothing here"]]);
        assert_eq!(resolve_code_export_header(&t), CompanyInfo::default());
        assert_eq!(resolve_vietnamese_header(&t), CompanyInfo::default());
    }

    #[test]
    fn test_code_export_year_row() {
        let t = RawTable::from_rows(vec![
            vec!["Company Name", "Acme", "", ""],
            vec!["FCC", "Statement Data", "2021", "2022", "2022", "1999"],
        ]);
        let years = code_export_year_columns(&t);
        assert_eq!(years.years(), vec![2021, 2022]);
        assert_eq!(years.column(2022), Some(3));
    }

    #[test]
    fn test_code_export_without_marker_has_no_years() {
        let t = RawTable::from_rows(vec![vec!["ATOT", "Total Assets", "2022"]]);
        assert!(code_export_year_columns(&t).is_empty());
    }

    #[test]
    fn test_vietnamese_header() {
        let t = RawTable::from_rows(vec![
            vec!["CÔNG TY CỔ PHẦN SỮA VIỆT NAM - VINAMILK\nMã CK: VNM"],
            vec!["Đơn vị tính: nghìn đồng"],
            vec!["", "", "Đơn vị: triệu đồng"],
        ]);
        let info = resolve_vietnamese_header(&t);
        assert_eq!(info.name, "CÔNG TY CỔ PHẦN SỮA VIỆT NAM");
        assert_eq!(info.scale_factor, ScaleFactor::Millions);
    }

    #[test]
    fn test_vietnamese_year_dedup_keeps_first_column() {
        let t = RawTable::from_rows(vec![
            vec!["Chỉ tiêu", "Mã số", "Thuyết minh", "2022", "2021", "", "", "2022"],
            vec!["", "", "", "", "", "", "", "2021"],
        ]);
        let years = vietnamese_year_columns(&t);
        assert_eq!(years.column(2022), Some(3));
        assert_eq!(years.column(2021), Some(4));
        assert_eq!(years.len(), 2);
    }
}
