use clap::Args;
use serde_json::Value;

use ews_core::extraction::extract_financial_statements;

use super::ConfigArgs;
use crate::input;

/// Arguments for workbook extraction
#[derive(Args)]
pub struct ExtractArgs {
    /// Path to the workbook (xlsx, xls, ods, csv or pre-parsed JSON)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run_extract(args: ExtractArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = args.config.load()?;
    let workbook = input::workbook::load_workbook(&args.file)?;
    let result = extract_financial_statements(&workbook, &config)?;
    Ok(serde_json::to_value(result)?)
}
