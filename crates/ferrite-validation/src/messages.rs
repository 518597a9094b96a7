//! Default message templates and override resolution

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::Response;

static TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut templates = HashMap::new();
    templates.insert("required", "The %s field is required");
    templates.insert("numeric", "The %s must be a number");
    templates.insert("alpha", "The %s may only contain letters");
    templates.insert("alpha_num", "The %s may only contain letters and numbers");
    templates.insert(
        "alpha_num_space",
        "The %s may only contain letters, numbers and spaces",
    );
    templates.insert("alpha_space", "The %s may only contain letters and spaces");
    templates.insert("email", "The %s must be a valid email address");
    templates.insert("url", "The %s must be a valid URL");
    templates.insert("json", "The %s must be a valid JSON string");
    templates.insert("lte", "The %s must be less than or equal %s");
    templates.insert("gte", "The %s must be greater than or equal %s");
    templates.insert("lt", "The %s must be less than %s");
    templates.insert("gt", "The %s must be greater than %s");
    templates.insert("range", "The %s must be between %s and %s");
    templates.insert("contains", "The %s must contain %s");
    templates.insert("match", "The %s format is invalid");
    templates.insert("same", "The %s must be same with %s");
    templates.insert("in", "The selected %s is invalid");
    templates.insert("not_in", "The selected %s is invalid");
    templates.insert("cc", "The %s must be a valid credit card number");
    templates
});

const FALLBACK: &str = "The %s is invalid";

/// Raw template for a rule, parameters unsubstituted. Field-mode
/// validation records this verbatim, since there is no field name to
/// substitute.
pub(crate) fn template(rule: &str) -> &'static str {
    TEMPLATES.get(rule).copied().unwrap_or(FALLBACK)
}

/// Resolved default message for a failing rule at a field: the humanized
/// field segment first, then the rule's parameter values where the
/// template takes them.
pub(crate) fn default_message(name: &str, param: &str, field: &str) -> String {
    let field = humanize(field);
    match name {
        "range" => {
            let (low, high) = param.split_once(',').unwrap_or((param, ""));
            fill(template(name), &[&field, low, high])
        }
        "lte" | "gte" | "lt" | "gt" | "contains" | "same" => {
            fill(template(name), &[&field, param])
        }
        _ => fill(template(name), &[&field]),
    }
}

/// Apply request-level message overrides to every recorded entry. Lookup
/// order per path: exact match, then the first wildcard pattern whose `*`
/// segments line up with integer index segments; otherwise the message is
/// left as resolved. Overrides never add entries.
pub(crate) fn apply_overrides(response: &mut Response, overrides: &HashMap<String, String>) {
    if overrides.is_empty() {
        return;
    }
    let mut patterns: Vec<(&str, &str)> = overrides
        .iter()
        .filter(|(pattern, _)| pattern.contains('*'))
        .map(|(pattern, message)| (pattern.as_str(), message.as_str()))
        .collect();
    patterns.sort();

    let paths: Vec<String> = response.messages().keys().cloned().collect();
    for path in paths {
        if let Some(message) = overrides.get(&path) {
            response.set_message(&path, message.clone());
            continue;
        }
        for (pattern, message) in &patterns {
            if wildcard_match(pattern, &path) {
                response.set_message(&path, (*message).to_string());
                break;
            }
        }
    }
}

/// `*` matches a single integer index segment at its position only, never
/// recursively: `members.*.age.range` covers `members.0.age.range` but
/// not `members.age.range`.
fn wildcard_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('.').collect();
    let path: Vec<&str> = path.split('.').collect();
    if pattern.len() != path.len() {
        return false;
    }
    pattern.iter().zip(path.iter()).all(|(want, got)| {
        if *want == "*" {
            !got.is_empty() && got.bytes().all(|b| b.is_ascii_digit())
        } else {
            want == got
        }
    })
}

/// Sequentially substitute `%s` placeholders.
fn fill(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    let mut from = 0;
    for arg in args {
        match out[from..].find("%s") {
            Some(offset) => {
                let at = from + offset;
                out.replace_range(at..at + 2, arg);
                from = at + arg.len();
            }
            None => break,
        }
    }
    out
}

/// Display form of a path segment (`member_code` → `member code`).
fn humanize(segment: &str) -> String {
    segment.replace('_', " ")
}
