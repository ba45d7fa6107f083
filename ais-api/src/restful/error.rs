use serde_json::Value;

/// Turns a failed response into the message shown to the operator.
///
/// FastAPI reports failures under `detail`: a plain string for handler
/// errors, a list of `{loc, msg, type}` objects for validation errors.
/// Anything else is shown as JSON text; without a usable `detail` the
/// status line is used.
pub fn error_message(status: u16, reason: &str, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|mut value| value.get_mut("detail").map(Value::take));

    match detail {
        Some(detail) if is_present(&detail) => detail_message(&detail),
        _ => format!("HTTP {status}: {reason}"),
    }
}

fn detail_message(detail: &Value) -> String {
    match detail {
        Value::String(message) => message.clone(),
        Value::Array(errors) => errors
            .iter()
            .map(|error| match error.get("msg") {
                Some(Value::String(msg)) if !msg.is_empty() => msg.clone(),
                _ => error.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn is_present(detail: &Value) -> bool {
    match detail {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
