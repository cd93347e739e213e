//! Constraint vocabulary shared by request validation and domain newtypes.
//!
//! Every failed constraint is a [`Violation`] carrying the tag it failed and
//! the parameter the message needs. [`FieldErrors`] collects at most one
//! violation per field; a `required` violation replaces any earlier one while
//! other violations keep the first reported entry.

use std::collections::BTreeMap;
use std::fmt;

/// Field key used for free-text payloads.
pub const FIELD_TEXT: &str = "Text";

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The value is empty or missing.
    Required,
    /// The value is shorter than the bound, counted in characters.
    Min(usize),
    /// The value is longer than the bound, counted in characters.
    Max(usize),
    /// The value is not one of the allowed options.
    OneOf(Vec<String>),
    /// The value contains characters other than ASCII letters and digits.
    Alphanumeric,
}

impl Violation {
    /// Stable constraint tag, matching the validator tag names.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::OneOf(_) => "oneof",
            Self::Alphanumeric => "alphanum",
        }
    }

    /// Client-facing message for the violation.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Violation;
    ///
    /// assert_eq!(Violation::Min(3).message(), "Минимум 3 символов");
    /// ```
    pub fn message(&self) -> String {
        match self {
            Self::Required => "Это поле обязательно".to_owned(),
            Self::Min(bound) => format!("Минимум {bound} символов"),
            Self::Max(bound) => format!("Максимум {bound} символов"),
            Self::OneOf(allowed) => format!("Введите валидное значение: {}", allowed.join(" ")),
            Self::Alphanumeric => "Допустимы только латинские буквы и цифры".to_owned(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Violation {}

/// Per-field validation failures keyed by client-facing field name.
///
/// Keys iterate in lexical order so rendered maps are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Violation>);

impl FieldErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding a single violation.
    pub fn single(field: impl Into<String>, violation: Violation) -> Self {
        let mut errors = Self::new();
        errors.insert(field, violation);
        errors
    }

    /// Record a violation for `field`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{FieldErrors, Violation};
    ///
    /// let mut errors = FieldErrors::new();
    /// errors.insert("Text", Violation::Min(3));
    /// errors.insert("Text", Violation::Required);
    /// errors.insert("Text", Violation::Max(500));
    /// assert_eq!(errors.get("Text"), Some(&Violation::Required));
    /// ```
    pub fn insert(&mut self, field: impl Into<String>, violation: Violation) {
        let field = field.into();
        match self.0.get(&field) {
            None => {
                self.0.insert(field, violation);
            }
            Some(existing) if *existing != Violation::Required && violation == Violation::Required => {
                self.0.insert(field, violation);
            }
            Some(_) => {}
        }
    }

    /// Violation recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Violation> {
        self.0.get(field)
    }

    /// Whether no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with a violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, violation)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Violation)> {
        self.0.iter().map(|(field, violation)| (field.as_str(), violation))
    }

    /// Render each violation to its message.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, violation)| (field.clone(), violation.message()))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, violation) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", violation.tag())?;
            first = false;
        }
        Ok(())
    }
}

/// Inclusive character-count bounds for a required text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min: usize,
    pub max: usize,
}

impl TextBounds {
    /// Construct bounds; `min` must not exceed `max`.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Check `value` against `required`, `min` and `max` in that order.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{TextBounds, Violation};
    ///
    /// let bounds = TextBounds::new(3, 500);
    /// assert_eq!(bounds.check(""), Err(Violation::Required));
    /// assert_eq!(bounds.check("ab"), Err(Violation::Min(3)));
    /// assert!(bounds.check("abc").is_ok());
    /// ```
    pub fn check(&self, value: &str) -> Result<(), Violation> {
        if value.is_empty() {
            return Err(Violation::Required);
        }
        let length = value.chars().count();
        if length < self.min {
            return Err(Violation::Min(self.min));
        }
        if length > self.max {
            return Err(Violation::Max(self.max));
        }
        Ok(())
    }
}

/// Check that `value` is one of `allowed`.
pub fn check_one_of(value: &str, allowed: &[&str]) -> Result<(), Violation> {
    if value.is_empty() {
        return Err(Violation::Required);
    }
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(Violation::OneOf(
            allowed.iter().map(|option| (*option).to_owned()).collect(),
        ))
    }
}

/// Check that `value` holds only ASCII letters and digits.
pub fn check_alphanumeric(value: &str) -> Result<(), Violation> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(Violation::Alphanumeric)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Violation::Required, "Это поле обязательно")]
    #[case(Violation::Min(3), "Минимум 3 символов")]
    #[case(Violation::Max(500), "Максимум 500 символов")]
    #[case(
        Violation::OneOf(vec!["local".into(), "dev".into(), "prod".into()]),
        "Введите валидное значение: local dev prod"
    )]
    #[case(Violation::Alphanumeric, "Допустимы только латинские буквы и цифры")]
    fn messages_match_locale(#[case] violation: Violation, #[case] expected: &str) {
        assert_eq!(violation.message(), expected);
    }

    #[rstest]
    #[case("", Err(Violation::Required))]
    #[case("ab", Err(Violation::Min(3)))]
    #[case("abc", Ok(()))]
    #[case("ёжик", Ok(()))]
    fn bounds_count_characters(#[case] value: &str, #[case] expected: Result<(), Violation>) {
        assert_eq!(TextBounds::new(3, 4).check(value), expected);
    }

    #[rstest]
    fn bounds_reject_values_over_max() {
        let value = "a".repeat(501);
        assert_eq!(TextBounds::new(3, 500).check(&value), Err(Violation::Max(500)));
    }

    #[rstest]
    fn first_non_required_violation_is_kept() {
        let mut errors = FieldErrors::new();
        errors.insert(FIELD_TEXT, Violation::Min(3));
        errors.insert(FIELD_TEXT, Violation::Max(500));
        assert_eq!(errors.get(FIELD_TEXT), Some(&Violation::Min(3)));
        assert_eq!(errors.len(), 1);
    }

    #[rstest]
    fn required_replaces_earlier_violation() {
        let mut errors = FieldErrors::single(FIELD_TEXT, Violation::Min(3));
        errors.insert(FIELD_TEXT, Violation::Required);
        assert_eq!(errors.get(FIELD_TEXT), Some(&Violation::Required));
    }

    #[rstest]
    fn messages_render_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert("Username", Violation::Alphanumeric);
        errors.insert(FIELD_TEXT, Violation::Required);
        let rendered = errors.messages();
        assert_eq!(rendered.get("Text").map(String::as_str), Some("Это поле обязательно"));
        assert_eq!(
            rendered.get("Username").map(String::as_str),
            Some("Допустимы только латинские буквы и цифры")
        );
    }

    #[rstest]
    #[case("dev", Ok(()))]
    #[case("", Err(Violation::Required))]
    fn one_of_accepts_listed_values(#[case] value: &str, #[case] expected: Result<(), Violation>) {
        assert_eq!(check_one_of(value, &["local", "dev", "prod"]), expected);
    }

    #[rstest]
    fn one_of_reports_allowed_values() {
        let err = check_one_of("staging", &["local", "dev"]).expect_err("staging is not allowed");
        assert_eq!(err.tag(), "oneof");
        assert_eq!(err.message(), "Введите валидное значение: local dev");
    }

    #[rstest]
    #[case("ada1815", true)]
    #[case("ada lovelace", false)]
    #[case("ада", false)]
    fn alphanumeric_accepts_ascii_only(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(check_alphanumeric(value).is_ok(), ok);
    }
}
