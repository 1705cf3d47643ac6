pub mod analyze;
pub mod detect;
pub mod extract;
pub mod score;

use clap::Args;
use rust_decimal::Decimal;

use ews_core::EwsConfig;

use crate::input;

/// Configuration flags shared by the workbook commands
#[derive(Args)]
pub struct ConfigArgs {
    /// Path to a JSON or YAML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Reject statement layouts the detector cannot classify
    #[arg(long)]
    pub strict: bool,

    /// Extraction fails once this share of required fields is missing
    #[arg(long)]
    pub completeness_threshold: Option<Decimal>,
}

impl ConfigArgs {
    /// The configuration file (or defaults) with flag overrides applied.
    pub fn load(&self) -> Result<EwsConfig, Box<dyn std::error::Error>> {
        let mut config: EwsConfig = match self.config {
            Some(ref path) => input::file::read_json_or_yaml(path)?,
            None => EwsConfig::default(),
        };
        if self.strict {
            config.strict_detection = true;
        }
        if let Some(threshold) = self.completeness_threshold {
            config.completeness_threshold = threshold;
        }
        config.validate()?;
        Ok(config)
    }
}
