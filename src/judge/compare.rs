//! Output comparison

use serde_json::Value;

use crate::constants::OUTPUT_PREVIEW_CHARS;

/// Relative tolerance for non-integer numbers
const FLOAT_TOLERANCE: f64 = 1e-9;

/// Deep JSON equality; integers compare exactly, floats within a relative
/// tolerance, object key order is irrelevant
pub fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
                return x == y;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => floats_equal(x, y),
                _ => false,
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => actual == expected,
    }
}

fn floats_equal(x: f64, y: f64) -> bool {
    if x == y {
        return true;
    }
    let scale = x.abs().max(y.abs()).max(1.0);
    (x - y).abs() <= FLOAT_TOLERANCE * scale
}

/// JavaScript-style truthiness of a validation result
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Shorten large values for display; small values pass through unchanged
pub fn preview(value: &Value) -> Value {
    let rendered = value.to_string();
    if rendered.chars().count() <= OUTPUT_PREVIEW_CHARS {
        return value.clone();
    }

    let cut: String = rendered.chars().take(OUTPUT_PREVIEW_CHARS).collect();
    Value::String(format!("{}... (truncated)", cut))
}

/// Shorten an error message for display
pub fn truncate_message(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= OUTPUT_PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(OUTPUT_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}
