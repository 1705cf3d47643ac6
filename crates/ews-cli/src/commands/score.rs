use clap::Args;
use serde_json::Value;

use ews_core::scoring::score_facts;
use ews_core::FactsMap;

use crate::input;

/// Arguments for scoring a single facts map
#[derive(Args)]
pub struct ScoreArgs {
    /// Path to a JSON facts map keyed by concept name
    /// (e.g. {"Total Assets": 1000000, "Revenue": 800000, ...})
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let facts: FactsMap = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(facts) = input::stdin::read_facts()? {
        facts
    } else {
        return Err("--input is required (or pipe a facts JSON object on stdin)".into());
    };

    let output = score_facts(&facts)?;
    Ok(serde_json::to_value(output)?)
}
