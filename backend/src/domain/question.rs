//! Question entity and its validated text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validation::{TextBounds, Violation};

/// Storage-assigned question identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question text holding between 3 and 500 characters.
///
/// # Examples
/// ```
/// use backend::domain::QuestionText;
///
/// let text = QuestionText::new("Why is the sky blue?").expect("valid text");
/// assert_eq!(text.as_ref(), "Why is the sky blue?");
/// assert!(QuestionText::new("ab").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionText(String);

impl QuestionText {
    /// Character-count bounds for question text.
    pub const BOUNDS: TextBounds = TextBounds::new(3, 500);

    /// Validate and construct question text.
    pub fn new(value: impl Into<String>) -> Result<Self, Violation> {
        let value = value.into();
        Self::BOUNDS.check(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for QuestionText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<QuestionText> for String {
    fn from(value: QuestionText) -> Self {
        value.0
    }
}

impl TryFrom<String> for QuestionText {
    type Error = Violation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Question waiting to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: QuestionText,
    pub created_at: DateTime<Utc>,
}

/// Persisted question.
///
/// Immutable once stored; only deletion changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub text: QuestionText,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Attach the storage-assigned id to a pending question.
    pub fn from_new(id: QuestionId, new: NewQuestion) -> Self {
        let NewQuestion { text, created_at } = new;
        Self {
            id,
            text,
            created_at,
        }
    }
}
