use serde_json::Value;
use std::io::{self, Write};

/// Print the result envelope as indented JSON on stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(stdout.lock(), value) {
        tracing::error!(error = %e, "failed to write JSON output");
    }
}

fn write_json<W: Write>(mut writer: W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_is_indented_with_trailing_newline() {
        let value = json!({"result": {"ews_level": "Distress"}, "warnings": []});
        let mut buf = Vec::new();
        write_json(&mut buf, &value).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"result\": {\n    \"ews_level\": \"Distress\"\n  },"));
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }
}
