//! End-to-end pipeline: workbook -> extraction -> scoring -> narrative for
//! one selected year.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::EwsConfig;
use crate::extraction::detect::FormatConvention;
use crate::extraction::header::CompanyInfo;
use crate::extraction::statement::{extract_financial_statements, ExtractionResult};
use crate::extraction::table::Workbook;
use crate::facts::FactsMap;
use crate::reporting::{build_report, ReportBundle, ReportInput};
use crate::scoring::benchmark::{compare_to_market, BenchmarkRow};
use crate::scoring::distress::{composite_score, discriminant_score, CompositeScore, DiscriminantScore};
use crate::scoring::ratios::{calculate_ratios, RatioSet};
use crate::scoring::signals::{assess_signals, evaluate_signals, SignalAssessment};
use crate::scoring::trend::{assess_trend, signal_trend, SignalTrendPoint, TrendAssessment};
use crate::types::*;
use crate::{EwsError, EwsResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearAnalysis {
    pub year: FiscalYear,
    pub company: CompanyInfo,
    pub format: FormatConvention,
    /// All years available in the extraction, ascending.
    pub years: Vec<FiscalYear>,
    pub facts: FactsMap,
    pub ratios: RatioSet,
    pub discriminant: DiscriminantScore,
    pub composite: CompositeScore,
    pub signals: SignalAssessment,
    pub priority_flag: bool,
    pub trend: TrendAssessment,
    pub signal_trend: Vec<SignalTrendPoint>,
    pub benchmarks: Vec<BenchmarkRow>,
    pub report: ReportBundle,
}

/// Score one year of a successful extraction, with trend against the
/// closest earlier year and comparison against the market medians.
pub fn analyze_year(
    extraction: &ExtractionResult,
    year: FiscalYear,
    config: &EwsConfig,
) -> EwsResult<ComputationOutput<YearAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if !extraction.success {
        let missing: Vec<String> = extraction.missing_fields.iter().map(|c| c.to_string()).collect();
        return Err(EwsError::InsufficientData(format!(
            "extraction incomplete, missing required fields: {}",
            missing.join(", ")
        )));
    }
    let facts = extraction.facts(year).ok_or_else(|| {
        EwsError::InsufficientData(format!("no statement data for fiscal year {year}"))
    })?;

    let ratios = calculate_ratios(facts);
    let discriminant = discriminant_score(facts, &ratios);
    let composite = composite_score(&ratios);
    let signals = assess_signals(facts, &ratios, &discriminant, &composite);

    let previous = extraction.preceding_year(year).and_then(|prev_year| {
        let prev_facts = extraction.facts(prev_year)?;
        let prev_signals = evaluate_signals(prev_facts, &calculate_ratios(prev_facts));
        Some((prev_year, prev_signals, prev_facts))
    });
    let trend = assess_trend(
        &signals,
        facts,
        previous
            .as_ref()
            .map(|(y, s, f)| (*y, s, *f)),
    );

    if config.benchmarks.for_year(year).is_none() {
        warnings.push(format!("No market medians available for {year}."));
    }
    if Some(year) == extraction.latest_year() {
        warnings.extend(
            extraction
                .missing_fields
                .iter()
                .map(|c| format!("{c} not found in the latest year.")),
        );
    }

    let report = build_report(&ReportInput {
        year,
        facts,
        ratios: &ratios,
        discriminant: &discriminant,
        signals: &signals,
        trend: &trend,
        num_years: extraction.years.len(),
    });

    debug!(
        year,
        n_signals = signals.n_signals,
        level = %signals.ews_level,
        trend = %trend.risk_trend,
        "year analysed"
    );

    let analysis = YearAnalysis {
        year,
        company: extraction.company_info.clone(),
        format: extraction.format,
        years: extraction.years.clone(),
        facts: facts.clone(),
        priority_flag: signals.priority_flag(),
        benchmarks: compare_to_market(&ratios, &config.benchmarks, year),
        signal_trend: signal_trend(&extraction.facts_by_year),
        ratios,
        discriminant,
        composite,
        signals,
        trend,
        report,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "selected_year": year,
        "previous_year": analysis.trend.previous_year,
        "scale_factor": analysis.company.scale_factor,
        "benchmarks": "research-sample market medians, informational only",
    });

    Ok(with_metadata(
        "Early-warning financial distress analysis",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    ))
}

/// Extract `workbook` and analyse `year`, or the latest year when `None`.
pub fn analyze_workbook(
    workbook: &Workbook,
    year: Option<FiscalYear>,
    config: &EwsConfig,
) -> EwsResult<ComputationOutput<YearAnalysis>> {
    let extraction = extract_financial_statements(workbook, config)?;
    let year = year
        .or_else(|| extraction.latest_year())
        .ok_or_else(|| EwsError::InsufficientData("no fiscal years extracted".into()))?;
    info!(
        company = %extraction.company_info.name,
        format = %extraction.format,
        year,
        "analysing workbook"
    );
    analyze_year(&extraction, year, config)
}
