use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::facts::{Concept, FactsMap};
use crate::scoring::ratios::{calculate_ratios, RatioSet};
use crate::scoring::signals::{evaluate_signals, EwsLevel, SignalAssessment};
use crate::types::{FiscalYear, Multiple, Rate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTrend {
    Worsening,
    Improving,
    Stable,
}

impl std::fmt::Display for RiskTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Worsening => write!(f, "Worsening"),
            Self::Improving => write!(f, "Improving"),
            Self::Stable => write!(f, "Stable"),
        }
    }
}

/// Movement of the selected year against the closest earlier year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAssessment {
    pub previous_year: Option<FiscalYear>,
    pub risk_trend: RiskTrend,
    /// n_signals(year) - n_signals(previous); 0 without a previous year.
    pub signal_delta: i32,
    /// EBIT change in percent of |previous EBIT|.
    pub ebit_yoy_pct: Option<Decimal>,
}

impl TrendAssessment {
    pub fn stable() -> Self {
        Self {
            previous_year: None,
            risk_trend: RiskTrend::Stable,
            signal_delta: 0,
            ebit_yoy_pct: None,
        }
    }

    pub fn is_worsening(&self) -> bool {
        self.risk_trend == RiskTrend::Worsening
    }
}

/// One year of the cross-year signal series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTrendPoint {
    pub year: FiscalYear,
    pub n_signals: u8,
    pub ews_level: EwsLevel,
    #[serde(rename = "ROA")]
    pub roa: Option<Rate>,
    #[serde(rename = "CUR")]
    pub cur: Option<Multiple>,
    #[serde(rename = "LEV")]
    pub lev: Option<Rate>,
    #[serde(rename = "FAR")]
    pub far: Option<Rate>,
}

/// Compare the selected year's signals against the previous year's.
pub fn assess_trend(
    current: &SignalAssessment,
    current_facts: &FactsMap,
    previous: Option<(FiscalYear, &SignalAssessment, &FactsMap)>,
) -> TrendAssessment {
    let Some((previous_year, prev_signals, prev_facts)) = previous else {
        return TrendAssessment::stable();
    };

    let signal_delta = i32::from(current.n_signals) - i32::from(prev_signals.n_signals);
    let risk_trend = match signal_delta {
        d if d > 0 => RiskTrend::Worsening,
        d if d < 0 => RiskTrend::Improving,
        _ => RiskTrend::Stable,
    };

    let ebit_yoy_pct = prev_facts.nonzero(Concept::Ebit).and_then(|prev| {
        let current = current_facts.get(Concept::Ebit).unwrap_or(Decimal::ZERO);
        (current - prev)
            .checked_div(prev.abs())
            .map(|change| change * Decimal::ONE_HUNDRED)
    });

    TrendAssessment {
        previous_year: Some(previous_year),
        risk_trend,
        signal_delta,
        ebit_yoy_pct,
    }
}

/// Signals and headline ratios for every year, ascending.
pub fn signal_trend(facts_by_year: &BTreeMap<FiscalYear, FactsMap>) -> Vec<SignalTrendPoint> {
    facts_by_year
        .iter()
        .map(|(year, facts)| {
            let ratios = calculate_ratios(facts);
            let signals = evaluate_signals(facts, &ratios);
            trend_point(*year, &signals, &ratios)
        })
        .collect()
}

fn trend_point(year: FiscalYear, signals: &SignalAssessment, ratios: &RatioSet) -> SignalTrendPoint {
    SignalTrendPoint {
        year,
        n_signals: signals.n_signals,
        ews_level: signals.ews_level,
        roa: ratios.roa,
        cur: ratios.cur,
        lev: ratios.lev,
        far: ratios.far,
    }
}
