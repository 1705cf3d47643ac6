pub mod narrative;
pub mod recommendations;

use serde::{Deserialize, Serialize};

use crate::facts::FactsMap;
use crate::scoring::distress::DiscriminantScore;
use crate::scoring::ratios::RatioSet;
use crate::scoring::signals::{liquidity_ratio, SignalAssessment};
use crate::scoring::trend::TrendAssessment;
use crate::types::FiscalYear;

pub use narrative::{executive_summary, headline, year_summary};
pub use recommendations::{assess_interest_coverage, generate_recommendations, CoverageAssessment};

/// Everything the narrative generator reads for one year.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub year: FiscalYear,
    pub facts: &'a FactsMap,
    pub ratios: &'a RatioSet,
    pub discriminant: &'a DiscriminantScore,
    pub signals: &'a SignalAssessment,
    pub trend: &'a TrendAssessment,
    /// Number of years in the extraction.
    pub num_years: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub headline: String,
    pub recommendations: Vec<String>,
    pub executive_summary: String,
    pub year_summary: String,
    pub coverage: CoverageAssessment,
    pub coverage_summary: String,
}

pub fn build_report(input: &ReportInput<'_>) -> ReportBundle {
    let coverage = assess_interest_coverage(input.facts);
    ReportBundle {
        headline: headline(input.signals.ews_level).to_string(),
        recommendations: generate_recommendations(input.signals, input.ratios),
        executive_summary: executive_summary(input.signals, input.num_years, input.trend),
        year_summary: year_summary(
            input.year,
            input.ratios,
            liquidity_ratio(input.ratios),
            input.signals,
            input.discriminant,
        ),
        coverage_summary: coverage.describe().to_string(),
        coverage,
    }
}
