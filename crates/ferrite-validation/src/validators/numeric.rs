//! Numeric kind and bound checks

use serde_json::Value;

use super::is_absent;

/// Passes for number kinds and for strings that parse completely as a
/// floating-point number.
pub(crate) fn numeric(value: &Value, _param: &str) -> bool {
    if is_absent(value) {
        return true;
    }
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.parse::<f64>().is_ok(),
        _ => false,
    }
}

pub(crate) fn gt(value: &Value, param: &str) -> bool {
    bound(value, param, |subject, limit| subject > limit, false)
}

pub(crate) fn gte(value: &Value, param: &str) -> bool {
    bound(value, param, |subject, limit| subject >= limit, false)
}

pub(crate) fn lt(value: &Value, param: &str) -> bool {
    bound(value, param, |subject, limit| subject < limit, true)
}

pub(crate) fn lte(value: &Value, param: &str) -> bool {
    bound(value, param, |subject, limit| subject <= limit, true)
}

/// Inclusive `[a,b]` containment. Anything short of two parseable bounds
/// makes the rule pass.
pub(crate) fn range(value: &Value, param: &str) -> bool {
    if is_absent(value) {
        return true;
    }
    let subject = match comparand(value) {
        Some(subject) => subject,
        None => return true,
    };
    let (low, high) = match param.split_once(',') {
        Some(bounds) => bounds,
        None => return true,
    };
    match (low.parse::<f64>(), high.parse::<f64>()) {
        (Ok(low), Ok(high)) => subject >= low && subject <= high,
        _ => true,
    }
}

/// Compare against a parsed numeric parameter. `vacuous` is the outcome
/// when the parameter does not parse: an unparsable limit satisfies
/// `lt`/`lte` while `gt`/`gte` can never be satisfied.
fn bound(value: &Value, param: &str, compare: fn(f64, f64) -> bool, vacuous: bool) -> bool {
    if is_absent(value) {
        return true;
    }
    let subject = match comparand(value) {
        Some(subject) => subject,
        None => return true,
    };
    match param.parse::<f64>() {
        Ok(limit) => compare(subject, limit),
        Err(_) => vacuous,
    }
}

/// Bound comparand: character count for strings, numeric value for numbers,
/// none for other kinds (which pass trivially).
fn comparand(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        _ => None,
    }
}
