//! Driving port for question and answer reads.

use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, Error, Question, QuestionId};

/// A question with its answers ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// Read-only use-cases over questions and answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsQuery: Send + Sync {
    /// All questions ordered by id ascending.
    async fn list_questions(&self) -> Result<Vec<Question>, Error>;

    /// One question and its answers.
    async fn get_question_with_answers(&self, id: QuestionId)
    -> Result<QuestionWithAnswers, Error>;

    /// One answer.
    async fn get_answer(&self, id: AnswerId) -> Result<Answer, Error>;
}
