//! Headline, executive summary and per-year narrative paragraphs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::scoring::distress::{DiscriminantScore, DiscriminantZone};
use crate::scoring::ratios::RatioSet;
use crate::scoring::signals::{EwsLevel, SignalAssessment};
use crate::scoring::trend::TrendAssessment;
use crate::types::{format_fixed, format_percent, FiscalYear, Multiple};

/// Number of drivers quoted in the executive summary.
const SUMMARY_DRIVERS: usize = 2;

const LOW_ROA: Decimal = dec!(0.03);
const MODERATE_LIQUIDITY: Multiple = dec!(1.5);
const HIGH_LEVERAGE: Decimal = dec!(0.7);

/// One-line verdict for the tier.
pub fn headline(level: EwsLevel) -> &'static str {
    match level {
        EwsLevel::Safe => {
            "The company is operating stably. Continue maintaining current financial indicators \
             and conduct regular monitoring."
        }
        EwsLevel::Watchlist => {
            "The company shows signs of declining profitability and liquidity pressure. Close \
             monitoring of cash flow and short-term debt repayment capacity is recommended."
        }
        EwsLevel::Distress => {
            "The company is experiencing serious financial difficulties. Urgent management \
             attention is required."
        }
    }
}

/// Executive summary paragraph.
///
/// The template depends on the tier, on whether more than one year was
/// extracted, and for the watchlist tier on a worsening signal trend. The
/// first two drivers are appended verbatim.
pub fn executive_summary(
    signals: &SignalAssessment,
    num_years: usize,
    trend: &TrendAssessment,
) -> String {
    let multi_year = num_years > 1;
    let mut summary = match signals.ews_level {
        EwsLevel::Safe if !multi_year => {
            "Based on the uploaded financial statements, the firm is currently classified as \
             financially stable. No major financial distress signals are triggered in the \
             reporting period. Key profitability and liquidity indicators remain within \
             acceptable ranges. However, regular monitoring is recommended to ensure that any \
             potential deterioration in operating performance is detected early."
        }
        EwsLevel::Safe => {
            "Based on the uploaded financial statements, the firm is currently assessed as \
             financially stable based on the early warning signals. While no immediate \
             financial distress is identified in the most recent year, certain financial \
             indicators show signs of fluctuation over time. Continued monitoring of \
             profitability and liquidity trends is recommended to prevent potential risk \
             accumulation."
        }
        EwsLevel::Watchlist if multi_year && trend.is_worsening() => {
            "The firm is currently classified as Watchlist based on the uploaded financial \
             statements. Although the firm has not entered financial distress, the number of \
             warning signals has increased compared to the previous period. This suggests a \
             deterioration in financial conditions, and proactive risk management actions are \
             advised, particularly in areas showing declining performance."
        }
        EwsLevel::Watchlist => {
            "Based on the uploaded financial statements, the firm is classified under the \
             Watchlist category. One or more early warning signals are triggered, indicating \
             potential weaknesses in profitability or liquidity. While no immediate financial \
             distress is identified, closer monitoring of key financial indicators is \
             recommended to prevent further risk escalation."
        }
        EwsLevel::Distress => {
            "The analysis of the uploaded financial statements indicates that the firm exhibits \
             multiple financial distress warning signals. Multiple financial indicators exceed \
             risk thresholds, reflecting pressure on profitability, liquidity, or capital \
             structure. Immediate attention and corrective actions are recommended to mitigate \
             financial risk and stabilize operations."
        }
    }
    .to_string();

    let drivers = signals.top_drivers(SUMMARY_DRIVERS);
    if !drivers.is_empty() {
        summary.push_str(" The primary concerns include: ");
        summary.push_str(&drivers.join("; "));
        summary.push('.');
    }
    summary
}

/// Narrative for a single fiscal year: tier, discriminant zone, ROA,
/// liquidity, leverage and the signal count. Discriminant and ROA sentences
/// are left out when undefined.
pub fn year_summary(
    year: FiscalYear,
    ratios: &RatioSet,
    liquidity: Multiple,
    signals: &SignalAssessment,
    discriminant: &DiscriminantScore,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(match signals.ews_level {
        EwsLevel::Safe => format!(
            "In {year}, the company is assessed as FINANCIALLY STABLE according to the early \
             warning system."
        ),
        EwsLevel::Watchlist => format!(
            "In {year}, the company shows FINANCIAL RISK INDICATORS and requires close monitoring."
        ),
        EwsLevel::Distress => format!(
            "In {year}, the company shows a high level of financial risk based on multiple \
             warning signals."
        ),
    });

    if let Some(z) = discriminant.score {
        let z = format_fixed(z, 2);
        match discriminant.zone {
            DiscriminantZone::Safe => parts.push(format!(
                "Altman Z-Score = {z} indicates the company is in the safe zone."
            )),
            DiscriminantZone::Grey => parts.push(format!(
                "Altman Z-Score = {z} is in the grey zone, monitoring required."
            )),
            DiscriminantZone::Distress => parts.push(format!(
                "Altman Z-Score = {z} is in the distress zone, immediate action needed."
            )),
            DiscriminantZone::NotAvailable => {}
        }
    }

    if let Some(roa) = ratios.roa {
        let pct = format_percent(roa, 2);
        parts.push(if roa < Decimal::ZERO {
            format!("Negative ROA ({pct}) indicates the company is operating at a loss.")
        } else if roa < LOW_ROA {
            format!("ROA at a low level ({pct}), indicating limited profitability.")
        } else {
            format!("ROA of {pct} demonstrates good profitability.")
        });
    }

    let fixed = format_fixed(liquidity, 2);
    if liquidity < Decimal::ONE {
        parts.push(format!("Current Ratio = {fixed} < 1 indicates high liquidity risk."));
    } else if liquidity < MODERATE_LIQUIDITY {
        parts.push(format!("Current Ratio = {fixed}, moderate liquidity level."));
    }

    if let Some(lev) = ratios.lev.filter(|l| *l > HIGH_LEVERAGE) {
        parts.push(format!(
            "Leverage of {} > 70% indicates high debt level.",
            format_percent(lev, 1)
        ));
    }

    parts.push(if signals.n_signals == 0 {
        "No early warning signals triggered. Recommend maintaining current financial condition."
            .to_string()
    } else {
        format!(
            "{} warning signal(s) triggered. Appropriate risk management measures are required.",
            signals.n_signals
        )
    });

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::trend::RiskTrend;

    fn signals(n: u8, drivers: &[&str]) -> SignalAssessment {
        SignalAssessment {
            signal_ebit: 0,
            signal_z: 0,
            signal_s: 0,
            n_signals: n,
            ews_level: EwsLevel::from_signal_count(n),
            drivers: drivers.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn worsening() -> TrendAssessment {
        TrendAssessment {
            previous_year: Some(2021),
            risk_trend: RiskTrend::Worsening,
            signal_delta: 1,
            ebit_yoy_pct: None,
        }
    }

    #[test]
    fn test_safe_templates_depend_on_year_count() {
        let s = signals(0, &[]);
        let single = executive_summary(&s, 1, &TrendAssessment::stable());
        let multi = executive_summary(&s, 3, &TrendAssessment::stable());
        assert!(single.contains("No major financial distress signals"));
        assert!(multi.contains("fluctuation over time"));
        assert!(!single.contains("primary concerns"));
    }

    #[test]
    fn test_watchlist_worsening_needs_history() {
        let s = signals(1, &["a"]);
        let worse = executive_summary(&s, 2, &worsening());
        assert!(worse.contains("has increased compared to the previous period"));
        let standard = executive_summary(&s, 2, &TrendAssessment::stable());
        assert!(standard.contains("classified under the Watchlist category"));
        let single = executive_summary(&s, 1, &worsening());
        assert!(single.contains("classified under the Watchlist category"));
    }

    #[test]
    fn test_top_two_drivers_appended() {
        let s = signals(2, &["first", "second", "third"]);
        let text = executive_summary(&s, 1, &TrendAssessment::stable());
        assert!(text.ends_with(" The primary concerns include: first; second."));
    }

    #[test]
    fn test_year_summary_sentences() {
        let ratios = RatioSet {
            roa: Some(dec!(0.02)),
            lev: Some(dec!(0.75)),
            ..RatioSet::default()
        };
        let z = DiscriminantScore {
            score: Some(dec!(1.5)),
            zone: DiscriminantZone::Grey,
            components: Vec::new(),
            zone_thresholds: (dec!(1.1), dec!(2.6)),
        };
        let text = year_summary(2022, &ratios, dec!(1.2), &signals(1, &[]), &z);
        assert_eq!(
            text,
            "In 2022, the company shows FINANCIAL RISK INDICATORS and requires close monitoring. \
             Altman Z-Score = 1.50 is in the grey zone, monitoring required. \
             ROA at a low level (2.00%), indicating limited profitability. \
             Current Ratio = 1.20, moderate liquidity level. \
             Leverage of 75.0% > 70% indicates high debt level. \
             1 warning signal(s) triggered. Appropriate risk management measures are required."
        );
    }

    #[test]
    fn test_headlines_differ() {
        assert_ne!(headline(EwsLevel::Safe), headline(EwsLevel::Distress));
    }
}
