//! Internal Diesel row structs and their mapping to domain entities.
//!
//! Rows are implementation details of the persistence layer and never leave
//! it. Identifiers are `BIGINT` in PostgreSQL and `u64` in the domain; every
//! conversion is checked.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Answer, AnswerId, AnswerText, NewAnswer, NewQuestion, Question, QuestionId, QuestionText,
    UserId,
};

use super::schema::{answers, questions};

/// Failure converting between rows and domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("{column} value {value} is out of range")]
    OutOfRange { column: &'static str, value: String },
    #[error("{column} holds invalid text: {reason}")]
    InvalidText { column: &'static str, reason: String },
}

fn id_to_row(column: &'static str, value: u64) -> Result<i64, RowConversionError> {
    i64::try_from(value).map_err(|_| RowConversionError::OutOfRange {
        column,
        value: value.to_string(),
    })
}

/// Key for looking up `value`; `None` when no stored row can carry it.
pub(crate) fn lookup_key(value: u64) -> Option<i64> {
    i64::try_from(value).ok()
}

fn id_from_row(column: &'static str, value: i64) -> Result<u64, RowConversionError> {
    u64::try_from(value).map_err(|_| RowConversionError::OutOfRange {
        column,
        value: value.to_string(),
    })
}

/// Row struct for reading from the questions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = RowConversionError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let text = QuestionText::new(row.text).map_err(|violation| {
            RowConversionError::InvalidText {
                column: "questions.text",
                reason: violation.to_string(),
            }
        })?;
        Ok(Self {
            id: QuestionId::new(id_from_row("questions.id", row.id)?),
            text,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for creating question records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub text: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewQuestion> for NewQuestionRow<'a> {
    fn from(value: &'a NewQuestion) -> Self {
        Self {
            text: value.text.as_ref(),
            created_at: value.created_at,
        }
    }
}

/// Row struct for reading from the answers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: i64,
    pub question_id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
    type Error = RowConversionError;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        let text =
            AnswerText::new(row.text).map_err(|violation| RowConversionError::InvalidText {
                column: "answers.text",
                reason: violation.to_string(),
            })?;
        Ok(Self {
            id: AnswerId::new(id_from_row("answers.id", row.id)?),
            question_id: QuestionId::new(id_from_row("answers.question_id", row.question_id)?),
            user_id: UserId::new(id_from_row("answers.user_id", row.user_id)?),
            text,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for creating answer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub(crate) struct NewAnswerRow<'a> {
    pub question_id: i64,
    pub user_id: i64,
    pub text: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> TryFrom<&'a NewAnswer> for NewAnswerRow<'a> {
    type Error = RowConversionError;

    fn try_from(value: &'a NewAnswer) -> Result<Self, Self::Error> {
        Ok(Self {
            question_id: id_to_row("answers.question_id", value.question_id.get())?,
            user_id: id_to_row("answers.user_id", value.user_id.get())?,
            text: value.text.as_ref(),
            created_at: value.created_at,
        })
    }
}
