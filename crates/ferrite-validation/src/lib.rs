//! # ferrite-validation
//!
//! Declarative validation engine for the ferrite framework. Values are
//! annotated with pipe-delimited rule tags (`required|gte:7`), walked
//! recursively, and failures are reported on dotted/indexed paths
//! (`members.0.age.range`) with human-readable messages.
//!
//! ```
//! use ferrite_validation::validate_field;
//!
//! assert!(validate_field(&"foo@bar.com", "required|email").is_valid());
//! assert!(!validate_field(&"invalid.com", "email").is_valid());
//! ```
//!
//! Composite types declare their rules through [`Validatable`]; the
//! request-binding layer calls [`validate_request`] for types opting into
//! [`ValidateRequest`], and [`validate_struct`] otherwise.

pub mod error;
mod messages;
pub mod rules;
pub mod traits;
pub mod validator;
pub mod validators;

pub use error::Response;
pub use rules::{FieldDef, FieldKind, Rule, RuleSet, Schema, SchemaRef};
pub use traits::{Validatable, ValidateRequest};
pub use validator::{validate_field, validate_request, validate_struct};
