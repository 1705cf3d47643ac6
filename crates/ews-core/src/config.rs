use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;
use crate::{EwsError, EwsResult};

#[cfg(feature = "extraction")]
use crate::extraction::aliases::AliasDictionaries;

#[cfg(feature = "scoring")]
use crate::scoring::benchmark::MarketBenchmarks;

/// Tunables and lookup data for a run. Passed explicitly to every
/// operation; nothing here is global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwsConfig {
    #[cfg(feature = "extraction")]
    pub aliases: AliasDictionaries,

    /// An extraction succeeds while the share of required concepts missing
    /// in the latest year stays strictly below this fraction.
    pub completeness_threshold: Rate,

    /// Treat a layout the detector cannot classify as a structural error
    /// instead of reading it as a single-sheet Vietnamese statement.
    pub strict_detection: bool,

    #[cfg(feature = "scoring")]
    pub benchmarks: MarketBenchmarks,
}

impl Default for EwsConfig {
    fn default() -> Self {
        Self {
            #[cfg(feature = "extraction")]
            aliases: AliasDictionaries::default(),
            completeness_threshold: dec!(0.5),
            strict_detection: false,
            #[cfg(feature = "scoring")]
            benchmarks: MarketBenchmarks::default(),
        }
    }
}

impl EwsConfig {
    pub fn validate(&self) -> EwsResult<()> {
        if self.completeness_threshold <= Rate::ZERO || self.completeness_threshold > Rate::ONE {
            return Err(EwsError::InvalidInput {
                field: "completeness_threshold".into(),
                reason: "must be in (0, 1]".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: EwsConfig = serde_json::from_str(r#"{"strict_detection": true}"#).unwrap();
        assert!(cfg.strict_detection);
        assert_eq!(cfg.completeness_threshold, dec!(0.5));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        let cfg = EwsConfig {
            completeness_threshold: dec!(0),
            ..EwsConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(EwsError::InvalidInput { .. })));
    }
}
