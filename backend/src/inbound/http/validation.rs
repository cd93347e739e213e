//! Request validation helpers for inbound HTTP adapters.
//!
//! Request DTOs declare their constraints with `validator` derives. This
//! module supplies the custom `required` check and folds `validator` reports
//! into the domain [`FieldErrors`] vocabulary, keyed by the upper-camel form
//! of the Rust field name.

use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{Error, FieldErrors, Violation};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// `validator` custom check: the value must not be empty.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// Convert a Rust field name into its client-facing key.
///
/// # Examples
/// ```
/// use backend::inbound::http::validation::field_key;
///
/// assert_eq!(field_key("text"), "Text");
/// assert_eq!(field_key("question_id"), "QuestionId");
/// ```
pub fn field_key(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn param_usize(error: &ValidationError, name: &str) -> Option<usize> {
    error
        .params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|value| usize::try_from(value).ok())
}

fn length_violation(error: &ValidationError) -> Option<Violation> {
    let length = error
        .params
        .get("value")
        .and_then(Value::as_str)
        .map(|value| value.chars().count());
    match (length, param_usize(error, "min"), param_usize(error, "max")) {
        (Some(length), Some(min), _) if length < min => Some(Violation::Min(min)),
        (Some(length), _, Some(max)) if length > max => Some(Violation::Max(max)),
        (None, Some(min), _) => Some(Violation::Min(min)),
        (None, None, Some(max)) => Some(Violation::Max(max)),
        _ => None,
    }
}

fn to_violation(error: &ValidationError) -> Option<Violation> {
    match &*error.code {
        "required" => Some(Violation::Required),
        "length" => length_violation(error),
        _ => None,
    }
}

/// Fold a `validator` report into per-field violations.
pub fn field_errors_from(report: &ValidationErrors) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, failures) in report.field_errors() {
        let key = field_key(field);
        for failure in failures {
            if let Some(violation) = to_violation(failure) {
                errors.insert(key.clone(), violation);
            }
        }
    }
    errors
}

/// Validate a request DTO, mapping failures to a validation [`Error`].
pub fn validate_request<T>(request: &T) -> Result<(), Error>
where
    T: Validate,
{
    request
        .validate()
        .map_err(|report| Error::validation(field_errors_from(&report)))
}

/// Parse an unsigned integer path segment.
pub(crate) fn parse_id(raw: &str, field: FieldName) -> Result<u64, Error> {
    raw.parse::<u64>().map_err(|_| {
        Error::invalid_request(format!("{} must be an unsigned integer", field.as_str()))
    })
}
