use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::json;

use ews_core::extraction::{detect_table_format, detect_workbook_format, resolve_convention, Workbook};
use ews_core::{EwsConfig, FactsMap};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_workbook(workbook_json: &str) -> NapiResult<Workbook> {
    serde_json::from_str(workbook_json).map_err(to_napi_error)
}

/// Defaults when no configuration is given; a partial object overrides
/// only the fields it names.
fn parse_config(config_json: Option<String>) -> NapiResult<EwsConfig> {
    match config_json {
        Some(raw) if !raw.trim().is_empty() => {
            let config: EwsConfig = serde_json::from_str(&raw).map_err(to_napi_error)?;
            config.validate().map_err(to_napi_error)?;
            Ok(config)
        }
        _ => Ok(EwsConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[napi]
pub fn extract_workbook(workbook_json: String, config_json: Option<String>) -> NapiResult<String> {
    let workbook = parse_workbook(&workbook_json)?;
    let config = parse_config(config_json)?;
    let result = ews_core::extraction::extract_financial_statements(&workbook, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[napi]
pub fn detect_format(workbook_json: String, config_json: Option<String>) -> NapiResult<String> {
    let workbook = parse_workbook(&workbook_json)?;
    let config = parse_config(config_json)?;
    let sheet_aliases = &config.aliases.vietnamese_sheets;

    let resolved = resolve_convention(&workbook, sheet_aliases, config.strict_detection)
        .map_err(to_napi_error)?;
    let output = json!({
        "format": resolved,
        "by_sheet_names": detect_workbook_format(&workbook, sheet_aliases),
        "first_sheet": workbook.first().map(|s| detect_table_format(s.table())),
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn score_facts(facts_json: String) -> NapiResult<String> {
    let facts: FactsMap = serde_json::from_str(&facts_json).map_err(to_napi_error)?;
    let output = ews_core::scoring::score_facts(&facts).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_workbook(
    workbook_json: String,
    year: Option<i32>,
    config_json: Option<String>,
) -> NapiResult<String> {
    let workbook = parse_workbook(&workbook_json)?;
    let config = parse_config(config_json)?;
    let output = ews_core::analysis::analyze_workbook(&workbook, year, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
