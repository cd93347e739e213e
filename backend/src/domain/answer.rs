//! Answer entity and its validated text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validation::{TextBounds, Violation};
use crate::domain::{QuestionId, UserId};

/// Storage-assigned answer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(u64);

impl AnswerId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer text holding between 1 and 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnswerText(String);

impl AnswerText {
    /// Character-count bounds for answer text.
    pub const BOUNDS: TextBounds = TextBounds::new(1, 1000);

    /// Validate and construct answer text.
    pub fn new(value: impl Into<String>) -> Result<Self, Violation> {
        let value = value.into();
        Self::BOUNDS.check(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for AnswerText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AnswerText> for String {
    fn from(value: AnswerText) -> Self {
        value.0
    }
}

impl TryFrom<String> for AnswerText {
    type Error = Violation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Answer waiting to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub text: AnswerText,
    pub created_at: DateTime<Utc>,
}

/// Persisted answer belonging to exactly one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub text: AnswerText,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Attach the storage-assigned id to a pending answer.
    pub fn from_new(id: AnswerId, new: NewAnswer) -> Self {
        let NewAnswer {
            question_id,
            user_id,
            text,
            created_at,
        } = new;
        Self {
            id,
            question_id,
            user_id,
            text,
            created_at,
        }
    }
}
