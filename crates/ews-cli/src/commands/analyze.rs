use clap::Args;
use serde_json::Value;

use ews_core::analysis::analyze_workbook;

use super::ConfigArgs;
use crate::input;

/// Arguments for end-to-end analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the workbook (xlsx, xls, ods, csv or pre-parsed JSON)
    #[arg(long)]
    pub file: String,

    /// Fiscal year to analyse (defaults to the latest year found)
    #[arg(long)]
    pub year: Option<i32>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = args.config.load()?;
    let workbook = input::workbook::load_workbook(&args.file)?;
    let output = analyze_workbook(&workbook, args.year, &config)?;
    Ok(serde_json::to_value(output)?)
}
