//! Character-class and string comparison rules

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::is_absent;

static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());
static ALPHA_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static ALPHA_NUM_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").unwrap());
static ALPHA_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z ]+$").unwrap());

pub(crate) fn alpha(value: &Value, _param: &str) -> bool {
    with_str(value, |s| ALPHA.is_match(s))
}

pub(crate) fn alpha_num(value: &Value, _param: &str) -> bool {
    with_str(value, |s| ALPHA_NUM.is_match(s))
}

pub(crate) fn alpha_num_space(value: &Value, _param: &str) -> bool {
    with_str(value, |s| ALPHA_NUM_SPACE.is_match(s))
}

pub(crate) fn alpha_space(value: &Value, _param: &str) -> bool {
    with_str(value, |s| ALPHA_SPACE.is_match(s))
}

/// Case-sensitive literal substring containment.
pub(crate) fn contains(value: &Value, param: &str) -> bool {
    with_str(value, |s| s.contains(param))
}

/// Regex search over the string (not a full match). An unparsable pattern
/// passes, the same lenient fallback as `range` with unparsable bounds.
pub(crate) fn matches(value: &Value, param: &str) -> bool {
    with_str(value, |s| match Regex::new(param) {
        Ok(pattern) => pattern.is_match(s),
        Err(_) => true,
    })
}

/// Exact equality with the literal parameter.
pub(crate) fn same(value: &Value, param: &str) -> bool {
    with_str(value, |s| s == param)
}

pub(crate) fn one_of(value: &Value, param: &str) -> bool {
    with_str(value, |s| param.split(',').any(|allowed| allowed == s))
}

pub(crate) fn not_one_of(value: &Value, param: &str) -> bool {
    with_str(value, |s| param.split(',').all(|denied| denied != s))
}

/// String rules only inspect string values; other kinds and absent values
/// pass trivially.
fn with_str(value: &Value, check: impl Fn(&str) -> bool) -> bool {
    if is_absent(value) {
        return true;
    }
    value.as_str().map(check).unwrap_or(true)
}
