use clap::Args;
use serde_json::{json, Value};

use ews_core::extraction::{detect_table_format, detect_workbook_format, resolve_convention};

use super::ConfigArgs;
use crate::input;

/// Arguments for layout detection
#[derive(Args)]
pub struct DetectArgs {
    /// Path to the workbook (xlsx, xls, ods, csv or pre-parsed JSON)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run_detect(args: DetectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = args.config.load()?;
    let workbook = input::workbook::load_workbook(&args.file)?;
    let sheet_aliases = &config.aliases.vietnamese_sheets;

    let resolved = resolve_convention(&workbook, sheet_aliases, config.strict_detection)?;
    let by_sheet_names = detect_workbook_format(&workbook, sheet_aliases);
    let first_sheet = workbook.first().map(|sheet| {
        json!({
            "name": sheet.name,
            "format": detect_table_format(sheet.table()),
        })
    });

    Ok(json!({
        "format": resolved,
        "by_sheet_names": by_sheet_names,
        "first_sheet": first_sheet,
        "sheets": workbook.sheet_names().collect::<Vec<_>>(),
    }))
}
