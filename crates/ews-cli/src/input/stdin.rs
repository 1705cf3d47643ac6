use std::error::Error;
use std::io::{self, Read};

use ews_core::FactsMap;

/// Facts map piped on stdin, keyed by concept name. `None` when stdin is a
/// terminal or the pipe carries nothing.
pub fn read_facts() -> Result<Option<FactsMap>, Box<dyn Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_facts(&buffer)
}

fn parse_facts(buffer: &str) -> Result<Option<FactsMap>, Box<dyn Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let facts = serde_json::from_str(trimmed)
        .map_err(|e| format!("stdin is not a facts object: {}", e))?;
    Ok(Some(facts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ews_core::Concept;
    use rust_decimal::Decimal;

    #[test]
    fn test_blank_pipe_is_no_input() {
        assert!(parse_facts("  \n").unwrap().is_none());
    }

    #[test]
    fn test_facts_keyed_by_concept_name() {
        let facts = parse_facts(r#"{"Total Assets": 1000, "EBIT": "-12.5"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(facts.get(Concept::TotalAssets), Some(Decimal::from(1000)));
        assert_eq!(facts.get(Concept::Ebit), Some(Decimal::new(-125, 1)));
    }

    #[test]
    fn test_unknown_concept_is_rejected() {
        let err = parse_facts(r#"{"Goodwill": 5}"#).unwrap_err();
        assert!(err.to_string().starts_with("stdin is not a facts object"));
    }
}
