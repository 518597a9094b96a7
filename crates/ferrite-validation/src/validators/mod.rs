//! Built-in rule evaluators and the process-wide registry

mod format;
mod numeric;
mod required;
mod strings;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

/// A rule evaluator: a pure predicate over a value and a raw parameter
/// string. Evaluators never mutate shared state.
pub type Evaluator = fn(&Value, &str) -> bool;

static REGISTRY: Lazy<HashMap<&'static str, Evaluator>> = Lazy::new(|| {
    let mut rules: HashMap<&'static str, Evaluator> = HashMap::new();
    rules.insert("required", required::required);
    rules.insert("numeric", numeric::numeric);
    rules.insert("lte", numeric::lte);
    rules.insert("gte", numeric::gte);
    rules.insert("lt", numeric::lt);
    rules.insert("gt", numeric::gt);
    rules.insert("range", numeric::range);
    rules.insert("alpha", strings::alpha);
    rules.insert("alpha_num", strings::alpha_num);
    rules.insert("alpha_num_space", strings::alpha_num_space);
    rules.insert("alpha_space", strings::alpha_space);
    rules.insert("contains", strings::contains);
    rules.insert("match", strings::matches);
    rules.insert("same", strings::same);
    rules.insert("in", strings::one_of);
    rules.insert("not_in", strings::not_one_of);
    rules.insert("email", format::email);
    rules.insert("url", format::url);
    rules.insert("json", format::json);
    rules.insert("cc", format::credit_card);
    rules
});

/// Look up an evaluator by rule name. Unknown names have no evaluator and
/// are treated as always passing by the caller, so unrecognized tags never
/// invalidate a field.
pub fn lookup(name: &str) -> Option<Evaluator> {
    REGISTRY.get(name).copied()
}

/// Nil and empty-string values satisfy every rule except `required`:
/// constraints are meaningless on absent data unless presence is demanded.
pub(crate) fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_known_rules() {
        for name in [
            "required",
            "numeric",
            "alpha",
            "alpha_num",
            "alpha_num_space",
            "alpha_space",
            "email",
            "url",
            "json",
            "lte",
            "gte",
            "lt",
            "gt",
            "range",
            "contains",
            "match",
            "same",
            "in",
            "not_in",
            "cc",
        ] {
            assert!(lookup(name).is_some(), "missing evaluator for {}", name);
        }
    }

    #[test]
    fn test_lookup_unknown_rule() {
        assert!(lookup("nonexistingtag").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("-").is_none());
    }

    #[test]
    fn test_null_passes_everything_but_required() {
        for (name, evaluate) in REGISTRY.iter() {
            let expected = *name != "required";
            assert_eq!(
                evaluate(&Value::Null, "7"),
                expected,
                "null under {}",
                name
            );
        }
    }

    #[test]
    fn test_empty_string_passes_everything_but_required() {
        for (name, evaluate) in REGISTRY.iter() {
            let expected = *name != "required";
            assert_eq!(
                evaluate(&json!(""), "7"),
                expected,
                "empty string under {}",
                name
            );
        }
    }
}
