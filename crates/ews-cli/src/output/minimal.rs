use serde_json::Value;

use super::scalar_text;

/// Answer fields tried in order, as JSON pointers into the result.
const PRIORITY_POINTERS: [&str; 5] = [
    "/signals/ews_level",
    "/ews_level",
    "/format",
    "/success",
    "/n_signals",
];

/// Print just the key answer value from the output: the risk tier for
/// analysis and scoring, the layout for detection, the success flag for
/// extraction. Falls back to the first field of the result.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for pointer in PRIORITY_POINTERS {
        if let Some(val) = result_obj.pointer(pointer).filter(|v| !v.is_null()) {
            return scalar_text(val);
        }
    }

    match result_obj {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{}: {}", key, scalar_text(val)))
            .unwrap_or_default(),
        other => scalar_text(other),
    }
}
