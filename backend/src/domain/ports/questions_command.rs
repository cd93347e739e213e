//! Driving port for question and answer mutations.

use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, Error, Question, QuestionId, UserId};

/// Request to create a question from raw client text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuestionRequest {
    pub text: String,
}

/// Request to answer an existing question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnswerRequest {
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub text: String,
}

/// Use-cases that change stored questions and answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsCommand: Send + Sync {
    /// Validate and store a new question.
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error>;

    /// Delete a question together with its answers.
    async fn delete_question(&self, id: QuestionId) -> Result<(), Error>;

    /// Validate and store an answer for an existing question.
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error>;

    /// Delete a single answer.
    async fn delete_answer(&self, id: AnswerId) -> Result<(), Error>;
}
