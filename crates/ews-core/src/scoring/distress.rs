use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::facts::{Concept, FactsMap};
use crate::scoring::ratios::RatioSet;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscriminantZone {
    #[serde(rename = "Safe Zone")]
    Safe,
    #[serde(rename = "Grey Zone")]
    Grey,
    #[serde(rename = "Distress Zone")]
    Distress,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl std::fmt::Display for DiscriminantZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe Zone"),
            Self::Grey => write!(f, "Grey Zone"),
            Self::Distress => write!(f, "Distress Zone"),
            Self::NotAvailable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeZone {
    Safe,
    Watch,
    Distress,
}

impl std::fmt::Display for CompositeZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Watch => write!(f, "Watch"),
            Self::Distress => write!(f, "Distress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub ratio: Decimal,
    pub coefficient: Decimal,
    pub weighted_value: Decimal,
}

/// Z''-style four-factor discriminant score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminantScore {
    /// `None` when total assets are absent or not positive.
    pub score: Option<Decimal>,
    pub zone: DiscriminantZone,
    pub components: Vec<ScoreComponent>,
    /// (distress_upper_bound, safe_lower_bound)
    pub zone_thresholds: (Decimal, Decimal),
}

/// Profitability / leverage / capped-liquidity heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub score: Decimal,
    pub zone: CompositeZone,
    pub components: Vec<ScoreComponent>,
    /// (distress_upper_bound, safe_lower_bound)
    pub zone_thresholds: (Decimal, Decimal),
}

// ---------------------------------------------------------------------------
// Coefficients
// ---------------------------------------------------------------------------

// Z''-Score (non-manufacturing / emerging markets)
const ZPP_COEFF_X1: Decimal = dec!(6.56);
const ZPP_COEFF_X2: Decimal = dec!(3.26);
const ZPP_COEFF_X3: Decimal = dec!(6.72);
const ZPP_COEFF_X4: Decimal = dec!(1.05);

const ZPP_SAFE: Decimal = dec!(2.60);
const ZPP_DISTRESS: Decimal = dec!(1.10);

// Composite score
const S_COEFF_ROA: Decimal = dec!(2.5);
const S_COEFF_LEV: Decimal = dec!(-0.5);
const S_COEFF_CUR: Decimal = dec!(0.3);
const S_CUR_CAP: Decimal = dec!(3);

const S_SAFE: Decimal = dec!(0.8);
const S_DISTRESS: Decimal = dec!(0.4);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Z'' = 6.56*X1 + 3.26*X2 + 6.72*X3 + 1.05*X4 with
/// X1 = working capital / TA, X2 = retained earnings / TA,
/// X3 = EBIT / TA (ROA when EBIT is absent or zero),
/// X4 = equity / total liabilities.
///
/// Absent inputs contribute zero to their factor. Scores strictly above 2.6
/// are safe, strictly above 1.1 grey, anything else distress.
pub fn discriminant_score(facts: &FactsMap, ratios: &RatioSet) -> DiscriminantScore {
    let total_assets = match facts.get(Concept::TotalAssets) {
        Some(ta) if ta > Decimal::ZERO => ta,
        _ => {
            return DiscriminantScore {
                score: None,
                zone: DiscriminantZone::NotAvailable,
                components: Vec::new(),
                zone_thresholds: (ZPP_DISTRESS, ZPP_SAFE),
            }
        }
    };

    let per_assets = |v: Option<Decimal>| {
        v.and_then(|v| v.checked_div(total_assets))
            .unwrap_or(Decimal::ZERO)
    };

    let working_capital = facts.get(Concept::TotalCurrentAssets).unwrap_or(Decimal::ZERO)
        - facts.get(Concept::TotalCurrentLiabilities).unwrap_or(Decimal::ZERO);
    let x1 = per_assets(Some(working_capital));
    let x2 = per_assets(facts.nonzero(Concept::RetainedEarnings));
    let x3 = match facts.nonzero(Concept::Ebit) {
        Some(ebit) => per_assets(Some(ebit)),
        None => ratios.roa.unwrap_or(Decimal::ZERO),
    };
    let x4 = match (
        facts.get(Concept::TotalLiabilities),
        facts.nonzero(Concept::ShareholdersEquity),
    ) {
        (Some(tl), Some(equity)) if tl > Decimal::ZERO => {
            equity.checked_div(tl).unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    };

    let components = vec![
        build_component("X1: Working Capital / Total Assets", x1, ZPP_COEFF_X1),
        build_component("X2: Retained Earnings / Total Assets", x2, ZPP_COEFF_X2),
        build_component("X3: EBIT / Total Assets", x3, ZPP_COEFF_X3),
        build_component("X4: Book Equity / Total Liabilities", x4, ZPP_COEFF_X4),
    ];
    let score: Decimal = components.iter().map(|c| c.weighted_value).sum();

    DiscriminantScore {
        score: Some(score),
        zone: classify_discriminant(score),
        components,
        zone_thresholds: (ZPP_DISTRESS, ZPP_SAFE),
    }
}

/// S = 2.5*ROA - 0.5*LEV + 0.3*min(CUR, 3). Above 0.8 safe, above 0.4
/// watch, otherwise distress. Undefined ratios contribute 0.
pub fn composite_score(ratios: &RatioSet) -> CompositeScore {
    let roa = ratios.roa.unwrap_or(Decimal::ZERO);
    let lev = ratios.lev.unwrap_or(Decimal::ZERO);
    let cur = ratios.cur.unwrap_or(Decimal::ZERO);

    let components = vec![
        build_component("ROA", roa, S_COEFF_ROA),
        build_component("LEV", lev, S_COEFF_LEV),
        build_component("min(CUR, 3)", cur.min(S_CUR_CAP), S_COEFF_CUR),
    ];
    let score: Decimal = components.iter().map(|c| c.weighted_value).sum();

    CompositeScore {
        score,
        zone: classify_composite(score),
        components,
        zone_thresholds: (S_DISTRESS, S_SAFE),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn classify_discriminant(score: Decimal) -> DiscriminantZone {
    if score > ZPP_SAFE {
        DiscriminantZone::Safe
    } else if score > ZPP_DISTRESS {
        DiscriminantZone::Grey
    } else {
        DiscriminantZone::Distress
    }
}

fn classify_composite(score: Decimal) -> CompositeZone {
    if score > S_SAFE {
        CompositeZone::Safe
    } else if score > S_DISTRESS {
        CompositeZone::Watch
    } else {
        CompositeZone::Distress
    }
}

fn build_component(name: &str, ratio: Decimal, coefficient: Decimal) -> ScoreComponent {
    ScoreComponent {
        name: name.to_string(),
        ratio,
        coefficient,
        weighted_value: coefficient * ratio,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
