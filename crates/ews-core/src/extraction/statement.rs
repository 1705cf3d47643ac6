use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::convention::{StatementConvention, StatementSheets};
use super::detect::{resolve_convention, FormatConvention};
use super::header::CompanyInfo;
use super::table::Workbook;
use crate::config::EwsConfig;
use crate::facts::{Concept, FactsMap, REQUIRED_CONCEPTS};
use crate::types::FiscalYear;
use crate::{EwsError, EwsResult};

/// Everything recovered from one workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Fewer than the configured share of required concepts are missing in
    /// the latest year. Scoring must not run when this is false.
    pub success: bool,
    pub format: FormatConvention,
    pub company_info: CompanyInfo,
    /// Ascending.
    pub years: Vec<FiscalYear>,
    pub facts_by_year: BTreeMap<FiscalYear, FactsMap>,
    /// Required concepts absent in the latest year.
    pub missing_fields: Vec<Concept>,
    pub errors: Vec<String>,
}

impl ExtractionResult {
    /// A result carrying only an error, for callers that present failures
    /// instead of propagating them.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            format: FormatConvention::Unknown,
            company_info: CompanyInfo::default(),
            years: Vec::new(),
            facts_by_year: BTreeMap::new(),
            missing_fields: Vec::new(),
            errors: vec![error.into()],
        }
    }

    pub fn latest_year(&self) -> Option<FiscalYear> {
        self.years.last().copied()
    }

    pub fn facts(&self, year: FiscalYear) -> Option<&FactsMap> {
        self.facts_by_year.get(&year)
    }

    /// Closest year before `year` that has facts.
    pub fn preceding_year(&self, year: FiscalYear) -> Option<FiscalYear> {
        self.facts_by_year.range(..year).next_back().map(|(y, _)| *y)
    }
}

// ---------------------------------------------------------------------------
// Workbook extraction
// ---------------------------------------------------------------------------

/// Detect the layout of `workbook` and extract a facts map for every year
/// column found.
///
/// Structural problems (no sheets, an unclassifiable layout under strict
/// detection, no year columns) are errors. Missing or unparseable lines are
/// not: they are simply absent from the facts, and a workbook with too many
/// required concepts missing comes back with `success == false`.
pub fn extract_financial_statements(
    workbook: &Workbook,
    config: &EwsConfig,
) -> EwsResult<ExtractionResult> {
    config.validate()?;

    let format = resolve_convention(
        workbook,
        &config.aliases.vietnamese_sheets,
        config.strict_detection,
    )?;
    let convention = StatementConvention::for_format(format, &config.aliases)
        .ok_or_else(|| EwsError::Structural("unrecognised statement layout".into()))?;
    let sheets = convention
        .select_sheets(workbook)
        .ok_or_else(|| EwsError::Structural("workbook contains no sheets".into()))?;

    let (company_info, year_columns) = convention.resolve_header(sheets.balance_sheet.table());
    if year_columns.is_empty() {
        return Err(EwsError::Structural(format!(
            "no fiscal-year columns found in sheet '{}'",
            sheets.balance_sheet.name
        )));
    }

    debug!(
        format = %format,
        company = %company_info.name,
        scale = %company_info.scale_factor,
        balance_sheet = %sheets.balance_sheet.name,
        income_statement = sheets.income_statement.map(|s| s.name.as_str()).unwrap_or("-"),
        years = year_columns.len(),
        "extracting statements"
    );

    let scale = company_info.scale_factor.multiplier();
    let facts_by_year: BTreeMap<FiscalYear, FactsMap> = year_columns
        .iter()
        .map(|(year, col)| (year, extract_year(&convention, &sheets, col, scale)))
        .collect();
    let years = year_columns.years();

    let missing_fields = years
        .last()
        .and_then(|y| facts_by_year.get(y))
        .map(|facts| facts.missing(&REQUIRED_CONCEPTS))
        .unwrap_or_else(|| REQUIRED_CONCEPTS.to_vec());
    let success = is_complete(missing_fields.len(), config);

    if !success {
        warn!(
            missing = missing_fields.len(),
            required = REQUIRED_CONCEPTS.len(),
            "too many required fields missing in the latest year"
        );
    }

    Ok(ExtractionResult {
        success,
        format,
        company_info,
        years,
        facts_by_year,
        missing_fields,
        errors: Vec::new(),
    })
}

/// [`extract_financial_statements`] with any error folded into a failed
/// result, for presentation layers that display errors verbatim.
pub fn extract_or_report(workbook: &Workbook, config: &EwsConfig) -> ExtractionResult {
    match extract_financial_statements(workbook, config) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "extraction aborted");
            ExtractionResult::failed(e.to_string())
        }
    }
}

fn is_complete(missing: usize, config: &EwsConfig) -> bool {
    Decimal::from(missing) < config.completeness_threshold * Decimal::from(REQUIRED_CONCEPTS.len())
}

// ---------------------------------------------------------------------------
// One year column
// ---------------------------------------------------------------------------

/// Facts for one year column, scaled to base units, with the derived-field
/// fallbacks applied.
pub fn extract_year(
    convention: &StatementConvention<'_>,
    sheets: &StatementSheets<'_>,
    year_col: usize,
    scale: Decimal,
) -> FactsMap {
    let mut facts = FactsMap::new();
    let balance = sheets.balance_sheet.table();
    let income = sheets.income_source().table();

    for &concept in convention.balance_sheet_concepts() {
        if let Some(value) = convention
            .locate(balance, concept, year_col)
            .and_then(|raw| raw.checked_mul(scale))
        {
            facts.insert(concept, value);
        }
    }

    if !facts.contains(Concept::TotalFixedAssetsNet) {
        let components: Decimal = convention
            .fixed_asset_components()
            .iter()
            .filter_map(|&c| convention.locate(balance, c, year_col))
            .sum();
        if components > Decimal::ZERO {
            if let Some(total) = components.checked_mul(scale) {
                debug!(year_col, %total, "fixed assets summed from components");
                facts.insert(Concept::TotalFixedAssetsNet, total);
            }
        }
    }

    for &concept in convention.income_statement_concepts() {
        if facts.contains(concept) {
            continue;
        }
        if let Some(value) = convention
            .locate(income, concept, year_col)
            .and_then(|raw| raw.checked_mul(scale))
        {
            facts.insert(concept, value);
        }
    }

    if convention.derives_interest_expense() {
        derive_interest_expense(&mut facts);
    }
    derive_ebit(&mut facts);

    facts
}

/// Interest Expense = Financial Expenses - Financial Revenue when interest
/// expense is absent or zero. A negative result is net financial income.
fn derive_interest_expense(facts: &mut FactsMap) {
    if facts.nonzero(Concept::InterestExpense).is_some() {
        return;
    }
    if let Some(expenses) = facts.nonzero(Concept::FinancialExpenses) {
        let revenue = facts.get(Concept::FinancialRevenue).unwrap_or(Decimal::ZERO);
        let derived = expenses - revenue;
        debug!(%derived, "interest expense derived from financial expenses");
        facts.insert(Concept::InterestExpense, derived);
    }
}

/// EBIT = Income before Taxes + Interest Expense when EBIT is absent or zero
/// and both inputs are non-zero.
fn derive_ebit(facts: &mut FactsMap) {
    if facts.nonzero(Concept::Ebit).is_some() {
        return;
    }
    if let (Some(ibt), Some(ie)) = (
        facts.nonzero(Concept::IncomeBeforeTaxes),
        facts.nonzero(Concept::InterestExpense),
    ) {
        let derived = ibt + ie;
        debug!(%derived, "EBIT derived from income before taxes");
        facts.insert(Concept::Ebit, derived);
    }
}
