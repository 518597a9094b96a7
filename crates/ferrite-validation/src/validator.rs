//! Validation entry points and the recursive struct walker

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Response;
use crate::messages;
use crate::rules::{FieldKind, Rule, RuleSet, Schema};
use crate::traits::{Validatable, ValidateRequest};
use crate::validators;

const NULL: Value = Value::Null;

/// Validate one scalar value against a rule tag. No path prefix and no
/// recursion: a failure is recorded at the bare rule name, with the raw
/// message template as the message (there is no field name to
/// substitute).
pub fn validate_field<T: Serialize>(value: &T, tag: &str) -> Response {
    let mut response = Response::new();
    let value = match serde_json::to_value(value) {
        Ok(value) => value,
        Err(_) => {
            response.invalidate();
            return response;
        }
    };
    let rules = RuleSet::parse(tag);
    if let Some(rule) = first_failure(&value, &rules) {
        response.failure(rule.name.clone(), messages::template(&rule.name));
    }
    response
}

/// Full structural validation: serialize the value and walk its schema,
/// recording at most one failure per offending field. Self-checks and
/// message overrides are not consulted.
///
/// A top-level value that does not serialize to an object yields an
/// immediately invalid response with no granular detail.
pub fn validate_struct<T: Validatable + Serialize>(value: &T) -> Response {
    let mut response = Response::new();
    match serde_json::to_value(value) {
        Ok(Value::Object(object)) => walk(T::schema(), &object, "", &mut response),
        _ => response.invalidate(),
    }
    response
}

/// Structural validation plus the request customization protocol: the
/// value's own [`check`](ValidateRequest::check) response is merged in
/// (existing entries win), then every recorded message is re-resolved
/// against the value's overrides.
pub fn validate_request<T: ValidateRequest>(value: &T) -> Response {
    let mut response = validate_struct(value);
    if let Some(extra) = value.check() {
        response.merge(extra);
    }
    messages::apply_overrides(&mut response, &value.messages());
    response
}

/// Evaluate rules in declared order and return the first that fails.
/// Unknown rule names have no evaluator and never fail.
fn first_failure<'a>(value: &Value, rules: &'a RuleSet) -> Option<&'a Rule> {
    rules.iter().find(|rule| {
        validators::lookup(&rule.name)
            .map(|evaluate| !evaluate(value, &rule.param))
            .unwrap_or(false)
    })
}

fn walk(schema: &Schema, object: &Map<String, Value>, prefix: &str, response: &mut Response) {
    for field in schema.fields() {
        if field.rules.is_skip() {
            continue;
        }
        match &field.kind {
            FieldKind::Embedded(nested) => {
                walk(nested(), object, prefix, response);
            }
            FieldKind::Scalar => {
                if field.rules.is_empty() {
                    continue;
                }
                let value = object.get(&field.name).unwrap_or(&NULL);
                if let Some(rule) = first_failure(value, &field.rules) {
                    let path = join(prefix, &field.name);
                    response.failure(
                        format!("{}.{}", path, rule.name),
                        messages::default_message(&rule.name, &rule.param, &field.name),
                    );
                }
            }
            FieldKind::Nested(nested) => {
                let value = object.get(&field.name).unwrap_or(&NULL);
                let path = join(prefix, &field.name);
                if !presence(value, field, &path, response) {
                    continue;
                }
                if let Value::Object(inner) = value {
                    walk(nested(), inner, &path, response);
                }
            }
            FieldKind::List(nested) => {
                let value = object.get(&field.name).unwrap_or(&NULL);
                let path = join(prefix, &field.name);
                if !presence(value, field, &path, response) {
                    continue;
                }
                if let Value::Array(items) = value {
                    for (index, item) in items.iter().enumerate() {
                        if let Value::Object(inner) = item {
                            walk(nested(), inner, &format!("{}.{}", path, index), response);
                        }
                    }
                }
            }
        }
    }
}

/// Composite presence pre-check. A nil value or empty collection fails a
/// declared `required` rule and stops recursion either way; untagged nil
/// or empty composites are skipped silently.
fn presence(
    value: &Value,
    field: &crate::rules::FieldDef,
    path: &str,
    response: &mut Response,
) -> bool {
    let missing = match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if missing {
        if field.rules.has("required") {
            response.failure(
                format!("{}.required", path),
                messages::default_message("required", "", &field.name),
            );
        }
        return false;
    }
    true
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use serde_json::json;

    #[test]
    fn test_field_sentinel_tags_always_pass() {
        assert!(validate_field(&Value::Null, "-").is_valid());
        assert!(validate_field(&Value::Null, "").is_valid());
        assert!(validate_field(&Value::Null, "nonexistingtag:1").is_valid());
    }

    #[test]
    fn test_field_rule_table() {
        let cases: Vec<(Value, &str, bool)> = vec![
            (json!(false), "required", true),
            (Value::Null, "required", false),
            (json!(0), "numeric", true),
            (json!("abcd"), "numeric", false),
            (json!(0), "required|numeric", false),
            (json!("abcd"), "alpha", true),
            (json!("abcd123"), "alpha", false),
            (json!("abcd123"), "alpha_num", true),
            (json!("abcd123!@#"), "alpha_num", false),
            (json!("abcd 123"), "alpha_num_space", true),
            (json!("foo@bar.com"), "email", true),
            (json!("invalid.com"), "email", false),
            (json!("https://foobar.com"), "url", true),
            (json!("xyz://foobar.com"), "url", false),
            (json!("123:f00"), "json", false),
            (json!("abcdefg"), "lte:7", true),
            (json!("abcdefghij"), "lte:7", false),
            (json!("abcdef"), "gte:7", false),
            (json!(2.5), "lt:test", true),
            (json!(2.5), "gte:test", false),
            (json!("abcdefgh"), "range:7.7,10", true),
            (json!("abcdef"), "range:abc,abcdefg", true),
            (json!("abacada"), "contains:a", true),
            (json!("abacada"), "contains:ritir", false),
            (json!("123456789"), "match:[0-9]+", true),
            (json!("abacada"), "match:cab$", false),
            (json!("abacada"), "same:abacada", true),
            (json!("abcd"), "in:abcd,cdba", true),
            (json!("abcd"), "not_in:abcd,cdba", false),
            (json!("abcd"), "alpha|in:abcde,cdba", false),
            (json!("5398228707871528"), "cc", true),
        ];

        for (value, tag, expected) in cases {
            let response = validate_field(&value, tag);
            assert_eq!(
                response.is_valid(),
                expected,
                "value {:?} under {:?}",
                value,
                tag
            );
        }
    }

    #[test]
    fn test_field_failure_records_raw_template() {
        let response = validate_field(&Value::Null, "required|numeric");
        assert!(!response.is_valid());
        assert_eq!(response.message("required"), "The %s field is required");
        assert_eq!(response.messages().len(), 1);
    }

    #[test]
    fn test_field_short_circuits_on_first_failure() {
        let response = validate_field(&json!("abcd123"), "alpha|numeric");
        assert!(!response.is_valid());
        assert_ne!(response.message("alpha"), "");
        assert_eq!(response.message("numeric"), "");
    }

    #[derive(serde::Serialize, Default)]
    struct Inner {
        label: String,
        count: i64,
    }

    impl Validatable for Inner {
        fn schema() -> &'static Schema {
            static SCHEMA: Lazy<Schema> = Lazy::new(|| {
                Schema::new()
                    .field("label", "required")
                    .field("count", "numeric")
            });
            &SCHEMA
        }
    }

    #[derive(serde::Serialize, Default)]
    struct Outer {
        title: String,
        #[serde(flatten)]
        inner: Inner,
    }

    impl Validatable for Outer {
        fn schema() -> &'static Schema {
            static SCHEMA: Lazy<Schema> = Lazy::new(|| {
                Schema::new()
                    .field("title", "required")
                    .embedded("", Inner::schema)
            });
            &SCHEMA
        }
    }

    #[test]
    fn test_embedded_fields_validate_on_parent_paths() {
        let outer = Outer {
            title: "t".to_string(),
            inner: Inner::default(),
        };
        let response = validate_struct(&outer);

        assert!(!response.is_valid());
        assert_ne!(response.message("label.required"), "");
        assert_eq!(response.message("inner.label.required"), "");
    }

    #[derive(serde::Serialize)]
    #[serde(transparent)]
    struct NotAStruct(String);

    impl Validatable for NotAStruct {
        fn schema() -> &'static Schema {
            static SCHEMA: Lazy<Schema> = Lazy::new(Schema::new);
            &SCHEMA
        }
    }

    #[test]
    fn test_non_object_top_level_is_invalid_without_detail() {
        let response = validate_struct(&NotAStruct("im not a struct".to_string()));
        assert!(!response.is_valid());
        assert!(response.messages().is_empty());
    }
}
