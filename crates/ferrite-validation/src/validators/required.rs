//! Presence check

use serde_json::Value;

/// Fails on nil and on the zero value of non-boolean kinds: empty string,
/// numeric zero, empty array. Booleans always pass, since absence cannot
/// be distinguished from `false`. Objects always pass: a struct value is
/// never nil, and absence of a nested struct arrives as null via `Option`.
pub(crate) fn required(value: &Value, _param: &str) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i != 0
            } else if let Some(u) = n.as_u64() {
                u != 0
            } else {
                n.as_f64().map_or(true, |f| f != 0.0)
            }
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}
