//! Error documents returned by the provider.
//!
//! The token endpoint answers failures with `{"error": "...", "error_description": "..."}`,
//! the REST API with `{"errors": [{"type": "...", "value": "..."}], ...}`. Any JSON
//! object carrying a non-empty `error` or `errors` member counts as error-shaped,
//! whatever the HTTP status.

use serde_json::Value;

/// Returns a readable message if `body` is an error-shaped document.
#[must_use]
pub fn provider_error_message(body: &Value) -> Option<String> {
    let error = body.get("error").filter(|v| is_present(v));
    let errors = body.get("errors").filter(|v| is_present(v));

    if let Some(error) = error {
        let mut message = describe(error);
        if let Some(description) = body.get("error_description").and_then(Value::as_str) {
            message = format!("{message}: {description}");
        }
        return Some(message);
    }

    errors.map(|errors| match errors {
        Value::Array(items) => items.iter().map(describe).collect::<Vec<_>>().join(", "),
        other => describe(other),
    })
}

/// Parses `bytes` as JSON and returns the provider error message, if any.
///
/// Bodies that are empty or not JSON are never error-shaped.
#[must_use]
pub fn provider_error_in(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .as_ref()
        .and_then(provider_error_message)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) => true,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let kind = map.get("type").and_then(Value::as_str);
            let detail = map.get("value").and_then(Value::as_str);
            match (kind, detail) {
                (Some(kind), Some(detail)) => format!("{kind} ({detail})"),
                (Some(kind), None) => kind.to_string(),
                _ => value.to_string(),
            }
        }
        other => other.to_string(),
    }
}
