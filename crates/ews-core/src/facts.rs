//! Canonical financial-statement vocabulary and the per-year facts record.
//!
//! Every value stored in a [`FactsMap`] is already expressed in base
//! currency units (the statement's reporting unit multiplied out). A missing
//! key means the concept was not found, which is different from a present
//! zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Money;

// ---------------------------------------------------------------------------
// Concepts
// ---------------------------------------------------------------------------

/// A canonical line item, independent of the label used by any one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Concept {
    #[serde(rename = "Total Assets")]
    TotalAssets,
    #[serde(rename = "Total Current Assets")]
    TotalCurrentAssets,
    #[serde(rename = "Total Current Liabilities")]
    TotalCurrentLiabilities,
    #[serde(rename = "Total Liabilities")]
    TotalLiabilities,
    #[serde(rename = "Total Fixed Assets - Net")]
    TotalFixedAssetsNet,
    #[serde(rename = "Shareholders Equity")]
    ShareholdersEquity,
    #[serde(rename = "Retained Earnings")]
    RetainedEarnings,
    #[serde(rename = "Revenue")]
    Revenue,
    #[serde(rename = "Net Income after Tax")]
    NetIncomeAfterTax,
    #[serde(rename = "Income before Taxes")]
    IncomeBeforeTaxes,
    #[serde(rename = "EBIT")]
    Ebit,
    #[serde(rename = "Interest Expense")]
    InterestExpense,
    // Intermediate concepts, only used to derive the ones above.
    #[serde(rename = "Tangible Fixed Assets Net")]
    TangibleFixedAssetsNet,
    #[serde(rename = "Leased Fixed Assets Net")]
    LeasedFixedAssetsNet,
    #[serde(rename = "Intangible Fixed Assets Net")]
    IntangibleFixedAssetsNet,
    #[serde(rename = "Financial Expenses")]
    FinancialExpenses,
    #[serde(rename = "Financial Revenue")]
    FinancialRevenue,
}

impl Concept {
    /// Canonical display name, identical to the serialized key.
    pub const fn name(self) -> &'static str {
        match self {
            Concept::TotalAssets => "Total Assets",
            Concept::TotalCurrentAssets => "Total Current Assets",
            Concept::TotalCurrentLiabilities => "Total Current Liabilities",
            Concept::TotalLiabilities => "Total Liabilities",
            Concept::TotalFixedAssetsNet => "Total Fixed Assets - Net",
            Concept::ShareholdersEquity => "Shareholders Equity",
            Concept::RetainedEarnings => "Retained Earnings",
            Concept::Revenue => "Revenue",
            Concept::NetIncomeAfterTax => "Net Income after Tax",
            Concept::IncomeBeforeTaxes => "Income before Taxes",
            Concept::Ebit => "EBIT",
            Concept::InterestExpense => "Interest Expense",
            Concept::TangibleFixedAssetsNet => "Tangible Fixed Assets Net",
            Concept::LeasedFixedAssetsNet => "Leased Fixed Assets Net",
            Concept::IntangibleFixedAssetsNet => "Intangible Fixed Assets Net",
            Concept::FinancialExpenses => "Financial Expenses",
            Concept::FinancialRevenue => "Financial Revenue",
        }
    }
}

impl std::fmt::Display for Concept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Concepts whose absence in the latest year counts against completeness.
pub const REQUIRED_CONCEPTS: [Concept; 7] = [
    Concept::TotalAssets,
    Concept::TotalCurrentAssets,
    Concept::TotalCurrentLiabilities,
    Concept::TotalLiabilities,
    Concept::ShareholdersEquity,
    Concept::NetIncomeAfterTax,
    Concept::Revenue,
];

// ---------------------------------------------------------------------------
// Facts map
// ---------------------------------------------------------------------------

/// One fiscal year of extracted facts, keyed by canonical concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactsMap(BTreeMap<Concept, Money>);

impl FactsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, concept: Concept) -> Option<Money> {
        self.0.get(&concept).copied()
    }

    /// The value only when it is present and non-zero.
    ///
    /// Derived-field fallbacks treat a zero the same as a missing line.
    pub fn nonzero(&self, concept: Concept) -> Option<Money> {
        self.get(concept).filter(|v| !v.is_zero())
    }

    pub fn contains(&self, concept: Concept) -> bool {
        self.0.contains_key(&concept)
    }

    pub fn insert(&mut self, concept: Concept, value: Money) -> Option<Money> {
        self.0.insert(concept, value)
    }

    pub fn remove(&mut self, concept: Concept) -> Option<Money> {
        self.0.remove(&concept)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Concept, Money)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    /// Concepts from `wanted` that have no value, in `wanted` order.
    pub fn missing(&self, wanted: &[Concept]) -> Vec<Concept> {
        wanted
            .iter()
            .copied()
            .filter(|c| !self.contains(*c))
            .collect()
    }

    /// Working capital (current assets less current liabilities) when both
    /// sides are present.
    pub fn working_capital(&self) -> Option<Money> {
        let ca = self.get(Concept::TotalCurrentAssets)?;
        let cl = self.get(Concept::TotalCurrentLiabilities)?;
        Some(ca - cl)
    }
}

impl FromIterator<(Concept, Money)> for FactsMap {
    fn from_iter<I: IntoIterator<Item = (Concept, Money)>>(iter: I) -> Self {
        FactsMap(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(Concept, Decimal); N]> for FactsMap {
    fn from(pairs: [(Concept, Decimal); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_matches_serialized_name() {
        for c in REQUIRED_CONCEPTS
            .into_iter()
            .chain([Concept::Ebit, Concept::TotalFixedAssetsNet])
        {
            assert_eq!(serde_json::to_value(c).unwrap(), c.to_string());
        }
    }

    #[test]
    fn test_absent_is_not_zero() {
        let facts = FactsMap::from([(Concept::Ebit, dec!(0))]);
        assert!(facts.contains(Concept::Ebit));
        assert_eq!(facts.get(Concept::Ebit), Some(dec!(0)));
        assert_eq!(facts.nonzero(Concept::Ebit), None);
        assert_eq!(facts.get(Concept::Revenue), None);
    }

    #[test]
    fn test_missing_preserves_order() {
        let facts = FactsMap::from([
            (Concept::TotalAssets, dec!(100)),
            (Concept::Revenue, dec!(50)),
        ]);
        let missing = facts.missing(&REQUIRED_CONCEPTS);
        assert_eq!(
            missing,
            vec![
                Concept::TotalCurrentAssets,
                Concept::TotalCurrentLiabilities,
                Concept::TotalLiabilities,
                Concept::ShareholdersEquity,
                Concept::NetIncomeAfterTax,
            ]
        );
    }

    #[test]
    fn test_serializes_with_canonical_keys() {
        let facts = FactsMap::from([(Concept::TotalFixedAssetsNet, dec!(150))]);
        let json = serde_json::to_string(&facts).unwrap();
        assert_eq!(json, r#"{"Total Fixed Assets - Net":"150"}"#);
        let back: FactsMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, facts);
    }
}
