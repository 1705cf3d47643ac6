use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::facts::{Concept, FactsMap};
use crate::scoring::ratios::RatioSet;
use crate::scoring::signals::{liquidity_ratio, EwsLevel, SignalAssessment};
use crate::types::{Money, Multiple};

const WATCHLIST_LIQUIDITY_FLOOR: Multiple = dec!(1.2);
const WATCHLIST_LEVERAGE_CEILING: Decimal = dec!(0.6);
const DISTRESS_LIQUIDITY_FLOOR: Multiple = dec!(0.8);
const STRONG_COVERAGE: Multiple = dec!(2);

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// Ordered management recommendations for the assessed tier.
pub fn generate_recommendations(signals: &SignalAssessment, ratios: &RatioSet) -> Vec<String> {
    let liquidity = liquidity_ratio(ratios);
    let mut out: Vec<&str> = Vec::new();

    match signals.ews_level {
        EwsLevel::Safe => {
            out.push("Financial condition is stable. Continue maintaining current indicators.");
            out.push(
                "Investment opportunities may be considered, subject to further strategic evaluation.",
            );
        }
        EwsLevel::Watchlist => {
            out.push("Close monitoring of financial indicators in subsequent periods is required.");
            if signals.signal_ebit == 1 {
                out.push("Improve operating profit margin to enhance interest coverage.");
            }
            if liquidity < WATCHLIST_LIQUIDITY_FLOOR {
                out.push("Strengthen working capital management to ensure liquidity.");
            }
            if ratios.lev.is_some_and(|l| l > WATCHLIST_LEVERAGE_CEILING) {
                out.push("Consider debt restructuring or increasing equity capital.");
            }
        }
        EwsLevel::Distress => {
            out.push("WARNING: The company shows strong signs of financial distress.");
            out.push("Urgent action is required:");
            if signals.signal_ebit == 1 {
                out.push("- Renegotiate debt terms with creditors.");
                out.push("- Cut unnecessary operating expenses.");
            }
            if signals.signal_z == 1 {
                out.push("- Consider selling non-performing assets.");
                out.push("- Seek additional capital from shareholders.");
            }
            if liquidity < DISTRESS_LIQUIDITY_FLOOR {
                out.push("- Prioritize settlement of maturing short-term debts.");
            }
            out.push("- Engage restructuring consultants if necessary.");
        }
    }

    out.into_iter().map(String::from).collect()
}

// ---------------------------------------------------------------------------
// Interest coverage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum CoverageAssessment {
    /// Financial revenue exceeds financial expenses.
    NetFinancialIncome { amount: Money },
    /// EBIT below interest expense.
    CannotCover { coverage: Multiple },
    /// Covered, but less than twice.
    Moderate { coverage: Multiple },
    Strong { coverage: Multiple },
    NotApplicable,
}

impl CoverageAssessment {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NetFinancialIncome { .. } => {
                "The company earns more from financial activities than it pays in interest."
            }
            Self::CannotCover { .. } => {
                "The firm cannot cover interest payments from operating earnings."
            }
            Self::Moderate { .. } => "Interest coverage is moderate, requires monitoring.",
            Self::Strong { .. } => "Strong interest coverage.",
            Self::NotApplicable => "Insufficient EBIT or interest data for coverage analysis.",
        }
    }
}

/// Classify how well EBIT covers interest expense.
pub fn assess_interest_coverage(facts: &FactsMap) -> CoverageAssessment {
    let interest = facts.get(Concept::InterestExpense);
    if let Some(ie) = interest.filter(|ie| *ie < Decimal::ZERO) {
        return CoverageAssessment::NetFinancialIncome { amount: ie.abs() };
    }

    let (Some(ie), Some(ebit)) = (
        interest.filter(|ie| *ie > Decimal::ZERO),
        facts.nonzero(Concept::Ebit),
    ) else {
        return CoverageAssessment::NotApplicable;
    };
    let Some(coverage) = ebit.checked_div(ie) else {
        return CoverageAssessment::NotApplicable;
    };

    if ebit < ie {
        CoverageAssessment::CannotCover { coverage }
    } else if coverage < STRONG_COVERAGE {
        CoverageAssessment::Moderate { coverage }
    } else {
        CoverageAssessment::Strong { coverage }
    }
}
