//! Driven port for answer persistence.

use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, NewAnswer, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "answer repository query failed: {message}",
        /// The referenced question does not exist.
        QuestionNotFound { question_id: u64 } =>
            "question {question_id} does not exist",
    }
}

/// Port for storing, reading and deleting answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Persist an answer and return it with its assigned id.
    ///
    /// Fails with [`AnswerRepositoryError::QuestionNotFound`] when the parent
    /// question is missing.
    async fn create(&self, answer: &NewAnswer) -> Result<Answer, AnswerRepositoryError>;

    /// Find an answer by id.
    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, AnswerRepositoryError>;

    /// Answers of one question ordered by id ascending.
    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError>;

    /// Delete an answer. Returns `false` when it did not exist.
    async fn delete(&self, id: AnswerId) -> Result<bool, AnswerRepositoryError>;
}
