//! Driven port for question persistence.

use async_trait::async_trait;

use crate::domain::{NewQuestion, Question, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "question repository query failed: {message}",
    }
}

/// Port for storing, reading and deleting questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// All questions ordered by id ascending.
    async fn list(&self) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Persist a question and return it with its assigned id.
    async fn create(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError>;

    /// Find a question by id.
    async fn find_by_id(&self, id: QuestionId)
    -> Result<Option<Question>, QuestionRepositoryError>;

    /// Delete a question and all of its answers atomically.
    ///
    /// Returns `false` when no question with `id` existed.
    async fn delete_with_answers(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_error_formats_message() {
        let err = QuestionRepositoryError::connection("pool exhausted");
        assert_eq!(
            err.to_string(),
            "question repository connection failed: pool exhausted"
        );
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = QuestionRepositoryError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
