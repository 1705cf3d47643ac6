use calamine::{open_workbook_auto, Data, Reader};
use std::error::Error;
use std::path::Path;
use tracing::debug;

use ews_core::extraction::{CellValue, RawTable, Sheet, Workbook};

use super::file;

/// Load a workbook for extraction.
///
/// `.json` files hold a pre-parsed workbook, `.csv` files become a single
/// sheet named after the file, anything else is opened as a spreadsheet
/// (xlsx, xlsm, xlsb, xls, ods).
pub fn load_workbook(path: &str) -> Result<Workbook, Box<dyn Error>> {
    let canonical = file::resolve_path(path)?;
    let extension = canonical
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let workbook = match extension.as_str() {
        "json" => file::read_json(path)?,
        "csv" => read_csv(&canonical)?,
        _ => read_spreadsheet(&canonical)?,
    };

    debug!(
        path = %canonical.display(),
        sheets = workbook.sheets.len(),
        "workbook loaded"
    );
    Ok(workbook)
}

fn read_spreadsheet(path: &Path) -> Result<Workbook, Box<dyn Error>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| format!("Failed to read sheet '{}': {}", name, e))?;

        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let mut grid = Grid::default();
        for (row, col, cell) in range.cells() {
            grid.set(
                row_offset as usize + row,
                col_offset as usize + col,
                data_to_cell(cell),
            );
        }
        sheets.push(Sheet::new(name, grid.into_table()));
    }

    Ok(Workbook::new(sheets))
}

fn read_csv(path: &Path) -> Result<Workbook, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::from).collect::<Vec<_>>());
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1");
    Ok(Workbook::new(vec![Sheet::new(name, RawTable::new(rows))]))
}

fn data_to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(f) => CellValue::from(*f),
        Data::Int(i) => CellValue::from(*i),
        Data::Bool(b) => CellValue::from(*b),
        other => CellValue::from(other.to_string()),
    }
}

/// Sparse cells placed at absolute positions, densified on demand.
#[derive(Default)]
struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if value.is_empty() {
            return;
        }
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, || CellValue::Empty);
        }
        cells[col] = value;
    }

    fn into_table(self) -> RawTable {
        RawTable::new(self.rows)
    }
}
