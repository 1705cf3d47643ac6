//! Three counted warning signals, advisory rationale, and the risk tier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::facts::{Concept, FactsMap};
use crate::scoring::distress::{
    composite_score, discriminant_score, CompositeScore, CompositeZone, DiscriminantScore,
    DiscriminantZone,
};
use crate::scoring::ratios::RatioSet;
use crate::types::{format_fixed, format_percent, Multiple};

const LIQUIDITY_FLOOR: Multiple = dec!(1);
const LEVERAGE_CEILING: Decimal = dec!(0.7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EwsLevel {
    Safe,
    Watchlist,
    Distress,
}

impl EwsLevel {
    /// 0 signals safe, 1 watchlist, 2 or more distress.
    pub fn from_signal_count(n_signals: u8) -> Self {
        match n_signals {
            0 => EwsLevel::Safe,
            1 => EwsLevel::Watchlist,
            _ => EwsLevel::Distress,
        }
    }
}

impl std::fmt::Display for EwsLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Watchlist => write!(f, "Watchlist"),
            Self::Distress => write!(f, "Distress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalAssessment {
    pub signal_ebit: u8,
    pub signal_z: u8,
    pub signal_s: u8,
    pub n_signals: u8,
    pub ews_level: EwsLevel,
    /// Counted-signal rationale first, then advisory lines.
    pub drivers: Vec<String>,
}

impl SignalAssessment {
    /// Whether the year should be escalated for review.
    pub fn priority_flag(&self) -> bool {
        self.n_signals >= 2 || self.ews_level == EwsLevel::Distress
    }

    /// Up to `n` leading drivers.
    pub fn top_drivers(&self, n: usize) -> &[String] {
        &self.drivers[..self.drivers.len().min(n)]
    }
}

/// Current ratio as the liquidity warnings read it; undefined counts as 0.
pub fn liquidity_ratio(ratios: &RatioSet) -> Multiple {
    ratios.cur.unwrap_or(Decimal::ZERO)
}

/// Combine facts, ratios and the two model results into a signal
/// assessment.
pub fn assess_signals(
    facts: &FactsMap,
    ratios: &RatioSet,
    discriminant: &DiscriminantScore,
    composite: &CompositeScore,
) -> SignalAssessment {
    let mut drivers = Vec::new();

    let signal_ebit = match (
        facts.nonzero(Concept::Ebit),
        facts.get(Concept::InterestExpense),
    ) {
        (Some(ebit), Some(interest)) if interest > Decimal::ZERO && ebit < interest => {
            drivers.push("EBIT lower than Interest Expense - Weak interest coverage".to_string());
            1
        }
        _ => 0,
    };

    let signal_z = match (discriminant.zone, discriminant.score) {
        (DiscriminantZone::Distress, Some(score)) => {
            drivers.push(format!(
                "Altman Z-Score = {} - Financial distress zone",
                format_fixed(score, 2)
            ));
            1
        }
        _ => 0,
    };

    let signal_s = if composite.zone == CompositeZone::Distress {
        drivers.push(format!(
            "S-Score = {} - High risk",
            format_fixed(composite.score, 2)
        ));
        1
    } else {
        0
    };

    let cur = liquidity_ratio(ratios);
    if cur < LIQUIDITY_FLOOR {
        drivers.push(format!(
            "Current Ratio = {} < 1 - Liquidity risk",
            format_fixed(cur, 2)
        ));
    }
    if let Some(lev) = ratios.lev.filter(|l| *l > LEVERAGE_CEILING) {
        drivers.push(format!(
            "Leverage = {} > 70% - High debt risk",
            format_percent(lev, 2)
        ));
    }
    if let Some(roa) = ratios.roa.filter(|r| *r < Decimal::ZERO) {
        drivers.push(format!("ROA = {} < 0 - Operating loss", format_percent(roa, 2)));
    }

    let n_signals = signal_ebit + signal_z + signal_s;
    SignalAssessment {
        signal_ebit,
        signal_z,
        signal_s,
        n_signals,
        ews_level: EwsLevel::from_signal_count(n_signals),
        drivers,
    }
}

/// Run both distress models and assess signals in one step.
pub fn evaluate_signals(facts: &FactsMap, ratios: &RatioSet) -> SignalAssessment {
    let discriminant = discriminant_score(facts, ratios);
    let composite = composite_score(ratios);
    assess_signals(facts, ratios, &discriminant, &composite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ratios::calculate_ratios;

    fn distressed() -> FactsMap {
        FactsMap::from([
            (Concept::TotalAssets, dec!(1000)),
            (Concept::TotalCurrentAssets, dec!(150)),
            (Concept::TotalCurrentLiabilities, dec!(300)),
            (Concept::TotalLiabilities, dec!(900)),
            (Concept::ShareholdersEquity, dec!(100)),
            (Concept::RetainedEarnings, dec!(-50)),
            (Concept::NetIncomeAfterTax, dec!(-40)),
            (Concept::Revenue, dec!(800)),
            (Concept::Ebit, dec!(10)),
            (Concept::InterestExpense, dec!(30)),
        ])
    }

    #[test]
    fn test_all_three_signals() {
        let facts = distressed();
        let s = evaluate_signals(&facts, &calculate_ratios(&facts));
        assert_eq!((s.signal_ebit, s.signal_z, s.signal_s), (1, 1, 1));
        assert_eq!(s.n_signals, 3);
        assert_eq!(s.ews_level, EwsLevel::Distress);
        assert!(s.priority_flag());
        assert_eq!(
            s.drivers[0],
            "EBIT lower than Interest Expense - Weak interest coverage"
        );
        assert!(s.drivers[1].starts_with("Altman Z-Score = "));
        assert!(s.drivers[2].starts_with("S-Score = "));
        assert!(s.drivers.contains(&"Current Ratio = 0.50 < 1 - Liquidity risk".to_string()));
        assert!(s.drivers.contains(&"Leverage = 90.00% > 70% - High debt risk".to_string()));
        assert!(s.drivers.contains(&"ROA = -4.00% < 0 - Operating loss".to_string()));
    }

    #[test]
    fn test_ebit_signal_needs_positive_interest() {
        let mut facts = distressed();
        facts.insert(Concept::InterestExpense, dec!(-30));
        let s = evaluate_signals(&facts, &calculate_ratios(&facts));
        assert_eq!(s.signal_ebit, 0);

        facts.insert(Concept::InterestExpense, dec!(30));
        facts.insert(Concept::Ebit, dec!(0));
        let s = evaluate_signals(&facts, &calculate_ratios(&facts));
        assert_eq!(s.signal_ebit, 0);
    }

    #[test]
    fn test_no_current_liabilities_reads_as_zero_liquidity() {
        let mut facts = distressed();
        facts.remove(Concept::TotalCurrentLiabilities);
        let ratios = calculate_ratios(&facts);
        assert_eq!(ratios.cur, Some(dec!(0)));
        assert_eq!(liquidity_ratio(&ratios), Decimal::ZERO);
        let s = evaluate_signals(&facts, &ratios);
        assert!(s
            .drivers
            .contains(&"Current Ratio = 0.00 < 1 - Liquidity risk".to_string()));
    }

    #[test]
    fn test_undefined_current_ratio_reads_as_zero() {
        assert_eq!(liquidity_ratio(&RatioSet::default()), Decimal::ZERO);
    }

    #[test]
    fn test_tier_mapping() {
        assert_eq!(EwsLevel::from_signal_count(0), EwsLevel::Safe);
        assert_eq!(EwsLevel::from_signal_count(1), EwsLevel::Watchlist);
        assert_eq!(EwsLevel::from_signal_count(2), EwsLevel::Distress);
        assert_eq!(EwsLevel::from_signal_count(3), EwsLevel::Distress);
    }

    #[test]
    fn test_advisories_do_not_count() {
        let facts = FactsMap::from([
            (Concept::TotalAssets, dec!(1000)),
            (Concept::TotalCurrentAssets, dec!(900)),
            (Concept::TotalCurrentLiabilities, dec!(100)),
            (Concept::TotalLiabilities, dec!(750)),
            (Concept::ShareholdersEquity, dec!(250)),
            (Concept::RetainedEarnings, dec!(200)),
            (Concept::NetIncomeAfterTax, dec!(400)),
            (Concept::Ebit, dec!(500)),
        ]);
        let s = evaluate_signals(&facts, &calculate_ratios(&facts));
        assert_eq!(s.n_signals, 0);
        assert_eq!(s.ews_level, EwsLevel::Safe);
        assert_eq!(s.drivers, vec!["Leverage = 75.00% > 70% - High debt risk".to_string()]);
        assert!(!s.priority_flag());
    }
}
