//! Validation response and error handling

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Outcome of a validation call: a validity flag plus failure messages
/// addressed by dotted/indexed path (`members.0.age.range`).
///
/// A response starts valid and empty, and is mutated only by appending
/// failures. Each validation call produces a fresh response; responses are
/// never pooled or reused.
#[derive(Debug, Clone, Serialize, Error)]
pub struct Response {
    valid: bool,
    messages: BTreeMap<String, String>,
}

impl Response {
    /// Create a new valid, empty response.
    pub fn new() -> Self {
        Self {
            valid: true,
            messages: BTreeMap::new(),
        }
    }

    /// Create a single-entry invalid response, for ad hoc programmatic
    /// errors outside the rule engine.
    pub fn with_failure(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut response = Self::new();
        response.failure(path, message);
        response
    }

    /// Whether the validated value satisfied every rule.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the response invalid without recording a message. Used for
    /// structural-shape failures that have no addressable path.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Record a failure message at a path and mark the response invalid.
    /// The first message written for a path wins; later writes to the same
    /// path are ignored.
    pub fn failure(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.messages.entry(path.into()).or_insert_with(|| message.into());
    }

    /// The message recorded at an exact path, or `""` when absent.
    pub fn message(&self, path: &str) -> &str {
        self.messages.get(path).map(String::as_str).unwrap_or("")
    }

    /// The full path → message map.
    pub fn messages(&self) -> &BTreeMap<String, String> {
        &self.messages
    }

    /// Per-field view with the trailing rule-name segment stripped
    /// (`user.age.required` → `user.age`), for compact API error payloads.
    /// Single-segment paths are kept whole so no key is ever empty; when
    /// several entries collapse to one key, the first in path order wins.
    pub fn errors(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for (path, message) in &self.messages {
            let key = match path.rsplit_once('.') {
                Some((field, _)) if !field.is_empty() => field,
                _ => path.as_str(),
            };
            errors
                .entry(key.to_string())
                .or_insert_with(|| message.clone());
        }
        errors
    }

    /// Fold another response into this one: validity is combined, messages
    /// are unioned, and existing entries are never replaced.
    pub fn merge(&mut self, other: Response) {
        self.valid = self.valid && other.valid;
        for (path, message) in other.messages {
            self.messages.entry(path).or_insert(message);
        }
    }

    /// Replace the message at an already-recorded path. No-op for paths
    /// without an entry, so overrides can never invent failures.
    pub(crate) fn set_message(&mut self, path: &str, message: String) {
        if let Some(slot) = self.messages.get_mut(path) {
            *slot = message;
        }
    }

    /// Convert into a `Result`, `Err` iff the response is invalid.
    pub fn into_result(self) -> Result<(), Response> {
        if self.valid {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "validation passed")
        } else if self.messages.is_empty() {
            write!(f, "validation failed")
        } else {
            write!(f, "validation failed for {} field(s):", self.errors().len())?;
            for (path, message) in &self.messages {
                write!(f, "\n  {}: {}", path, message)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response_is_valid_and_empty() {
        let response = Response::new();
        assert!(response.is_valid());
        assert!(response.messages().is_empty());
        assert_eq!(response.message("anything"), "");
    }

    #[test]
    fn test_failure_marks_invalid() {
        let mut response = Response::new();
        response.failure("test", "ok");

        assert!(!response.is_valid());
        assert_eq!(response.message("test"), "ok");
    }

    #[test]
    fn test_first_write_wins_per_path() {
        let mut response = Response::new();
        response.failure("name.required", "first");
        response.failure("name.required", "second");

        assert_eq!(response.message("name.required"), "first");
        assert_eq!(response.messages().len(), 1);
    }

    #[test]
    fn test_with_failure_constructor() {
        let response = Response::with_failure("email", "email is not valid");
        assert!(!response.is_valid());
        assert_eq!(response.message("email"), "email is not valid");
    }

    #[test]
    fn test_errors_strips_trailing_rule_segment() {
        let mut response = Response::new();
        response.failure("user.age.required", "The age field is required");
        response.failure("username.required", "The username field is required");

        let errors = response.errors();
        assert_eq!(
            errors.get("user.age").map(String::as_str),
            Some("The age field is required")
        );
        assert_eq!(
            errors.get("username").map(String::as_str),
            Some("The username field is required")
        );
    }

    #[test]
    fn test_errors_keeps_single_segment_paths_whole() {
        let mut response = Response::new();
        response.failure("required", "The %s field is required");

        let errors = response.errors();
        assert_eq!(
            errors.get("required").map(String::as_str),
            Some("The %s field is required")
        );
        assert!(errors.keys().all(|key| !key.is_empty()));
    }

    #[test]
    fn test_errors_first_entry_wins_on_collapse() {
        let mut response = Response::new();
        response.failure("password.gte", "too short");
        response.failure("password.required", "missing");

        let errors = response.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("password").map(String::as_str), Some("too short"));
    }

    #[test]
    fn test_merge_keeps_existing_entries() {
        let mut response = Response::new();
        response.failure("username.required", "structural");

        let mut extra = Response::new();
        extra.failure("username.required", "custom");
        extra.failure("username.invalid", "username is not valid");

        response.merge(extra);
        assert!(!response.is_valid());
        assert_eq!(response.message("username.required"), "structural");
        assert_eq!(response.message("username.invalid"), "username is not valid");
    }

    #[test]
    fn test_merge_propagates_invalidity_without_messages() {
        let mut response = Response::new();
        let mut extra = Response::new();
        extra.invalidate();

        response.merge(extra);
        assert!(!response.is_valid());
        assert!(response.messages().is_empty());
    }

    #[test]
    fn test_into_result() {
        assert!(Response::new().into_result().is_ok());

        let failed = Response::with_failure("zip.required", "missing").into_result();
        assert!(failed.is_err());
        assert_eq!(failed.unwrap_err().message("zip.required"), "missing");
    }

    #[test]
    fn test_display_summarizes_messages() {
        let mut response = Response::new();
        response.failure("email.email", "invalid address");

        let rendered = response.to_string();
        assert!(rendered.contains("validation failed"));
        assert!(rendered.contains("email.email: invalid address"));
    }

    #[test]
    fn test_errors_serialize_to_flat_json() {
        let mut response = Response::new();
        response.failure("user.name.required", "required");
        response.failure("username.required", "The username field is required");

        let json = serde_json::to_string(&response.errors()).unwrap();
        assert_eq!(
            json,
            r#"{"user.name":"required","username":"The username field is required"}"#
        );
    }
}
