//! Capability traits for validated types

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Response;
use crate::rules::Schema;

/// A composite type that declares validation rules for its fields.
///
/// Implementations build the schema once and cache it behind a lazy
/// static, so tags are parsed a single time per type:
///
/// ```
/// use ferrite_validation::{Schema, Validatable};
/// use once_cell::sync::Lazy;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Address {
///     street: String,
///     zip: String,
/// }
///
/// impl Validatable for Address {
///     fn schema() -> &'static Schema {
///         static SCHEMA: Lazy<Schema> = Lazy::new(|| {
///             Schema::new().field("street", "-").field("zip", "required")
///         });
///         &SCHEMA
///     }
/// }
/// ```
pub trait Validatable {
    /// Field descriptors for this type, in declaration order.
    fn schema() -> &'static Schema;
}

/// Request-level customization protocol.
///
/// Opting in marks a type as a top-level request payload for
/// [`validate_request`](crate::validate_request). Both methods default to
/// "no customization" and are independently overridable; neither is ever
/// consulted for nested values, only for the outermost one.
pub trait ValidateRequest: Validatable + Serialize {
    /// Structural self-check contributing additional failure paths and
    /// messages, merged after rule validation. Entries never replace
    /// rule failures already recorded at the same path.
    fn check(&self) -> Option<Response> {
        None
    }

    /// Message overrides by path pattern. A `*` segment matches any
    /// collection index at that position. Overrides win over built-in
    /// default messages, exact matches before wildcard matches.
    fn messages(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}
