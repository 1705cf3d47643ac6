use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::facts::{Concept, FactsMap};
use crate::types::*;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Financial ratios for one year. `None` means undefined: the denominator
/// was not positive or an input was absent. A defined zero is a real zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    #[serde(rename = "ROA")]
    pub roa: Option<Rate>,
    #[serde(rename = "LEV")]
    pub lev: Option<Rate>,
    #[serde(rename = "FAR")]
    pub far: Option<Rate>,
    /// Current ratio. Zero, not undefined, when there are no current
    /// liabilities.
    #[serde(rename = "CUR")]
    pub cur: Option<Multiple>,
    /// Natural log of total assets.
    #[serde(rename = "SIZE")]
    pub size: Option<Decimal>,
    #[serde(rename = "Equity_to_Assets")]
    pub equity_to_assets: Option<Rate>,
    #[serde(rename = "Working_Capital_to_Assets")]
    pub working_capital_to_assets: Option<Rate>,
    #[serde(rename = "Net_Profit_Margin")]
    pub net_profit_margin: Option<Rate>,
    #[serde(rename = "EBIT_Margin")]
    pub ebit_margin: Option<Rate>,
    #[serde(rename = "Equity_to_Debt")]
    pub equity_to_debt: Option<Multiple>,
    #[serde(rename = "EBIT_to_Interest")]
    pub ebit_to_interest: Option<Multiple>,
    #[serde(rename = "Interest_Coverage")]
    pub interest_coverage: Option<Multiple>,
    #[serde(rename = "Retained_Earnings_to_Assets")]
    pub retained_earnings_to_assets: Option<Rate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioName {
    #[serde(rename = "ROA")]
    Roa,
    #[serde(rename = "LEV")]
    Lev,
    #[serde(rename = "FAR")]
    Far,
    #[serde(rename = "CUR")]
    Cur,
    #[serde(rename = "SIZE")]
    Size,
    #[serde(rename = "Equity_to_Assets")]
    EquityToAssets,
    #[serde(rename = "Working_Capital_to_Assets")]
    WorkingCapitalToAssets,
    #[serde(rename = "Net_Profit_Margin")]
    NetProfitMargin,
    #[serde(rename = "EBIT_Margin")]
    EbitMargin,
    #[serde(rename = "Equity_to_Debt")]
    EquityToDebt,
    #[serde(rename = "EBIT_to_Interest")]
    EbitToInterest,
    #[serde(rename = "Interest_Coverage")]
    InterestCoverage,
    #[serde(rename = "Retained_Earnings_to_Assets")]
    RetainedEarningsToAssets,
}

impl RatioName {
    pub const ALL: [RatioName; 13] = [
        RatioName::Roa,
        RatioName::Lev,
        RatioName::Far,
        RatioName::Cur,
        RatioName::Size,
        RatioName::EquityToAssets,
        RatioName::WorkingCapitalToAssets,
        RatioName::NetProfitMargin,
        RatioName::EbitMargin,
        RatioName::EquityToDebt,
        RatioName::EbitToInterest,
        RatioName::InterestCoverage,
        RatioName::RetainedEarningsToAssets,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            RatioName::Roa => "ROA",
            RatioName::Lev => "LEV",
            RatioName::Far => "FAR",
            RatioName::Cur => "CUR",
            RatioName::Size => "SIZE",
            RatioName::EquityToAssets => "Equity_to_Assets",
            RatioName::WorkingCapitalToAssets => "Working_Capital_to_Assets",
            RatioName::NetProfitMargin => "Net_Profit_Margin",
            RatioName::EbitMargin => "EBIT_Margin",
            RatioName::EquityToDebt => "Equity_to_Debt",
            RatioName::EbitToInterest => "EBIT_to_Interest",
            RatioName::InterestCoverage => "Interest_Coverage",
            RatioName::RetainedEarningsToAssets => "Retained_Earnings_to_Assets",
        }
    }
}

impl std::fmt::Display for RatioName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl RatioSet {
    pub fn get(&self, name: RatioName) -> Option<Decimal> {
        match name {
            RatioName::Roa => self.roa,
            RatioName::Lev => self.lev,
            RatioName::Far => self.far,
            RatioName::Cur => self.cur,
            RatioName::Size => self.size,
            RatioName::EquityToAssets => self.equity_to_assets,
            RatioName::WorkingCapitalToAssets => self.working_capital_to_assets,
            RatioName::NetProfitMargin => self.net_profit_margin,
            RatioName::EbitMargin => self.ebit_margin,
            RatioName::EquityToDebt => self.equity_to_debt,
            RatioName::EbitToInterest => self.ebit_to_interest,
            RatioName::InterestCoverage => self.interest_coverage,
            RatioName::RetainedEarningsToAssets => self.retained_earnings_to_assets,
        }
    }

    /// Defined ratios in canonical order.
    pub fn defined(&self) -> impl Iterator<Item = (RatioName, Decimal)> + '_ {
        RatioName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|v| (name, v)))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the ratio set for one year of facts.
///
/// Every ratio whose denominator is not strictly positive, or whose inputs
/// are absent, is undefined. The one exception is CUR, which is zero when
/// current liabilities are absent or not positive.
pub fn calculate_ratios(facts: &FactsMap) -> RatioSet {
    let total_assets = facts.get(Concept::TotalAssets);
    let total_liabilities = facts.get(Concept::TotalLiabilities);
    let equity = facts.get(Concept::ShareholdersEquity);
    let net_income = facts.get(Concept::NetIncomeAfterTax);
    let revenue = facts.get(Concept::Revenue);
    let ebit = facts.get(Concept::Ebit);
    let interest = facts.get(Concept::InterestExpense);

    let ebit_to_interest = safe_divide(ebit, interest);

    RatioSet {
        roa: safe_divide(net_income, total_assets),
        lev: safe_divide(total_liabilities, total_assets),
        far: safe_divide(facts.get(Concept::TotalFixedAssetsNet), total_assets),
        cur: current_ratio(facts),
        size: total_assets
            .filter(|ta| *ta > Decimal::ZERO)
            .and_then(|ta| ta.checked_ln()),
        equity_to_assets: safe_divide(equity, total_assets),
        working_capital_to_assets: safe_divide(facts.working_capital(), total_assets),
        net_profit_margin: safe_divide(net_income, revenue),
        ebit_margin: safe_divide(ebit, revenue),
        equity_to_debt: safe_divide(equity, total_liabilities),
        ebit_to_interest,
        interest_coverage: ebit_to_interest,
        retained_earnings_to_assets: safe_divide(facts.get(Concept::RetainedEarnings), total_assets),
    }
}

fn current_ratio(facts: &FactsMap) -> Option<Multiple> {
    match facts.get(Concept::TotalCurrentLiabilities) {
        Some(cl) if cl > Decimal::ZERO => {
            safe_divide(facts.get(Concept::TotalCurrentAssets), Some(cl))
        }
        _ => Some(Decimal::ZERO),
    }
}

/// `numerator / denominator` when both are present and the denominator is
/// strictly positive.
pub(crate) fn safe_divide(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    let den = denominator.filter(|d| *d > Decimal::ZERO)?;
    numerator?.checked_div(den)
}
