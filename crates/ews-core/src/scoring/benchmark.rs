//! Market-median reference table and the per-ratio comparison against it.
//! Informational only: nothing here feeds the signal count.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::ratios::{RatioName, RatioSet};
use crate::types::{FiscalYear, Multiple, Rate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkMedians {
    #[serde(rename = "ROA")]
    pub roa: Rate,
    #[serde(rename = "CUR")]
    pub cur: Multiple,
    #[serde(rename = "LEV")]
    pub lev: Rate,
    #[serde(rename = "FAR")]
    pub far: Rate,
    #[serde(rename = "WC_Assets")]
    pub wc_assets: Rate,
}

impl BenchmarkMedians {
    const fn new(roa: Rate, cur: Multiple, lev: Rate, far: Rate, wc_assets: Rate) -> Self {
        Self {
            roa,
            cur,
            lev,
            far,
            wc_assets,
        }
    }
}

/// Fiscal year -> market medians.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketBenchmarks(BTreeMap<FiscalYear, BenchmarkMedians>);

impl Default for MarketBenchmarks {
    /// Medians of the listed-firm research sample, 2014-2025.
    fn default() -> Self {
        Self(BTreeMap::from([
            (2014, BenchmarkMedians::new(dec!(0.052769), dec!(1.510826), dec!(0.502633), dec!(0.360363), dec!(0.187950))),
            (2015, BenchmarkMedians::new(dec!(0.052414), dec!(1.606347), dec!(0.504608), dec!(0.337595), dec!(0.210579))),
            (2016, BenchmarkMedians::new(dec!(0.054283), dec!(1.641246), dec!(0.500153), dec!(0.360917), dec!(0.211378))),
            (2017, BenchmarkMedians::new(dec!(0.059779), dec!(1.589761), dec!(0.493173), dec!(0.374649), dec!(0.202941))),
            (2018, BenchmarkMedians::new(dec!(0.059748), dec!(1.604579), dec!(0.476176), dec!(0.358879), dec!(0.200405))),
            (2019, BenchmarkMedians::new(dec!(0.050066), dec!(1.563973), dec!(0.474889), dec!(0.367471), dec!(0.214203))),
            (2020, BenchmarkMedians::new(dec!(0.046377), dec!(1.557456), dec!(0.467699), dec!(0.371910), dec!(0.185982))),
            (2021, BenchmarkMedians::new(dec!(0.050660), dec!(1.653436), dec!(0.464749), dec!(0.333126), dec!(0.216935))),
            (2022, BenchmarkMedians::new(dec!(0.045701), dec!(1.677991), dec!(0.454609), dec!(0.324720), dec!(0.226708))),
            (2023, BenchmarkMedians::new(dec!(0.033380), dec!(1.671736), dec!(0.452314), dec!(0.323718), dec!(0.220284))),
            (2024, BenchmarkMedians::new(dec!(0.038895), dec!(1.677622), dec!(0.455929), dec!(0.317569), dec!(0.228293))),
            (2025, BenchmarkMedians::new(dec!(0.030631), dec!(1.446915), dec!(0.432996), dec!(0.309996), dec!(0.232440))),
        ]))
    }
}

impl MarketBenchmarks {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn for_year(&self, year: FiscalYear) -> Option<&BenchmarkMedians> {
        self.0.get(&year)
    }

    pub fn insert(&mut self, year: FiscalYear, medians: BenchmarkMedians) {
        self.0.insert(year, medians);
    }

    pub fn years(&self) -> impl Iterator<Item = FiscalYear> + '_ {
        self.0.keys().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativePosition {
    #[serde(rename = "Above median")]
    AboveMedian,
    #[serde(rename = "Below median")]
    BelowMedian,
    #[serde(rename = "Lower than median")]
    LowerThanMedian,
    #[serde(rename = "Higher than median")]
    HigherThanMedian,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl std::fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveMedian => write!(f, "Above median"),
            Self::BelowMedian => write!(f, "Below median"),
            Self::LowerThanMedian => write!(f, "Lower than median"),
            Self::HigherThanMedian => write!(f, "Higher than median"),
            Self::NotAvailable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub ratio: RatioName,
    pub label: String,
    pub value: Option<Decimal>,
    pub market_median: Option<Decimal>,
    pub relative_position: RelativePosition,
}

/// Compare ROA, CUR, LEV, FAR and WC/Assets against the medians for `year`.
///
/// For ROA, CUR and WC/Assets higher is better; for LEV and FAR lower is.
pub fn compare_to_market(
    ratios: &RatioSet,
    benchmarks: &MarketBenchmarks,
    year: FiscalYear,
) -> Vec<BenchmarkRow> {
    let medians = benchmarks.for_year(year);
    let row = |ratio: RatioName, label: &str, median: Option<Decimal>, higher_is_better: bool| {
        let value = ratios.get(ratio);
        let relative_position = match (value, median) {
            (Some(v), Some(m)) if higher_is_better => {
                if v >= m {
                    RelativePosition::AboveMedian
                } else {
                    RelativePosition::BelowMedian
                }
            }
            (Some(v), Some(m)) => {
                if v <= m {
                    RelativePosition::LowerThanMedian
                } else {
                    RelativePosition::HigherThanMedian
                }
            }
            _ => RelativePosition::NotAvailable,
        };
        BenchmarkRow {
            ratio,
            label: label.to_string(),
            value,
            market_median: median,
            relative_position,
        }
    };

    vec![
        row(RatioName::Roa, "ROA", medians.map(|m| m.roa), true),
        row(RatioName::Cur, "Current Ratio", medians.map(|m| m.cur), true),
        row(RatioName::Lev, "Leverage", medians.map(|m| m.lev), false),
        row(RatioName::Far, "Fixed Asset Ratio (FAR)", medians.map(|m| m.far), false),
        row(
            RatioName::WorkingCapitalToAssets,
            "WC / Assets",
            medians.map(|m| m.wc_assets),
            true,
        ),
    ]
}
