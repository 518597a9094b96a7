//! Format rules: email addresses, URLs, JSON documents, card numbers

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use super::is_absent;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

// Major-network card shapes: Visa, Mastercard, Amex, Discover, Diners, JCB.
static CARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|6(?:011|5[0-9]{2})[0-9]{12}|3[47][0-9]{13}|3(?:0[0-5]|[68][0-9])[0-9]{11}|(?:2131|1800|35[0-9]{3})[0-9]{11})$").unwrap()
});

/// Syntactically valid `local-part@domain` address.
pub(crate) fn email(value: &Value, _param: &str) -> bool {
    if is_absent(value) {
        return true;
    }
    value.as_str().map(|s| EMAIL.is_match(s)).unwrap_or(true)
}

/// Absolute URL whose scheme is exactly `http` or `https`.
pub(crate) fn url(value: &Value, _param: &str) -> bool {
    if is_absent(value) {
        return true;
    }
    let s = match value.as_str() {
        Some(s) => s,
        None => return true,
    };
    match Url::parse(s) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Syntactically valid JSON document, with nothing trailing.
pub(crate) fn json(value: &Value, _param: &str) -> bool {
    if is_absent(value) {
        return true;
    }
    value
        .as_str()
        .map(|s| serde_json::from_str::<Value>(s).is_ok())
        .unwrap_or(true)
}

/// Card number check: spaces and hyphens are stripped, any other
/// non-digit fails, and the digits must match a recognized network shape.
pub(crate) fn credit_card(value: &Value, _param: &str) -> bool {
    if is_absent(value) {
        return true;
    }
    let s = match value.as_str() {
        Some(s) => s,
        None => return true,
    };
    let mut digits = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' => {}
            _ => return false,
        }
    }
    CARD.is_match(&digits)
}
