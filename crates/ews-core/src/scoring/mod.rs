pub mod benchmark;
pub mod distress;
pub mod ratios;
pub mod signals;
pub mod trend;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::facts::{FactsMap, REQUIRED_CONCEPTS};
use crate::reporting::{assess_interest_coverage, generate_recommendations, CoverageAssessment};
use crate::types::*;
use crate::{EwsError, EwsResult};

use distress::{composite_score, discriminant_score, CompositeScore, DiscriminantScore, DiscriminantZone};
use ratios::{calculate_ratios, RatioSet};
use signals::{assess_signals, SignalAssessment};

/// Scoring of a single facts map, without cross-year context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreCard {
    pub ratios: RatioSet,
    pub discriminant: DiscriminantScore,
    pub composite: CompositeScore,
    pub signals: SignalAssessment,
    pub priority_flag: bool,
    pub recommendations: Vec<String>,
    pub coverage: CoverageAssessment,
}

/// Ratios, both distress models, signals and recommendations for one year
/// of facts.
pub fn score_facts(facts: &FactsMap) -> EwsResult<ComputationOutput<ScoreCard>> {
    let start = Instant::now();

    if facts.is_empty() {
        return Err(EwsError::InsufficientData(
            "no financial facts supplied".into(),
        ));
    }

    let card = build_score_card(facts);

    let mut warnings: Vec<String> = facts
        .missing(&REQUIRED_CONCEPTS)
        .into_iter()
        .map(|c| format!("{c} not provided; dependent ratios are undefined."))
        .collect();
    if card.discriminant.zone == DiscriminantZone::NotAvailable {
        warnings.push("Discriminant score unavailable: total assets missing or not positive.".into());
    }
    let undefined: Vec<&str> = [
        ("ROA", card.ratios.roa),
        ("LEV", card.ratios.lev),
        ("CUR", card.ratios.cur),
    ]
    .iter()
    .filter(|(_, value)| value.is_none())
    .map(|(name, _)| *name)
    .collect();
    if !undefined.is_empty() {
        warnings.push(format!(
            "Composite score takes undefined {} as 0.",
            undefined.join(", ")
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "discriminant": "Z'' = 6.56*X1 + 3.26*X2 + 6.72*X3 + 1.05*X4; safe > 2.6, grey > 1.1",
        "composite": "S = 2.5*ROA - 0.5*LEV + 0.3*min(CUR, 3); safe > 0.8, watch > 0.4",
        "tiers": "0 signals Safe, 1 Watchlist, 2+ Distress",
    });

    Ok(with_metadata(
        "Early-warning distress scoring (Z'' discriminant + composite score)",
        &assumptions,
        warnings,
        elapsed,
        card,
    ))
}

pub(crate) fn build_score_card(facts: &FactsMap) -> ScoreCard {
    let ratios = calculate_ratios(facts);
    let discriminant = discriminant_score(facts, &ratios);
    let composite = composite_score(&ratios);
    let signals = assess_signals(facts, &ratios, &discriminant, &composite);
    let recommendations = generate_recommendations(&signals, &ratios);
    ScoreCard {
        priority_flag: signals.priority_flag(),
        coverage: assess_interest_coverage(facts),
        ratios,
        discriminant,
        composite,
        signals,
        recommendations,
    }
}
