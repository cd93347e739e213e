//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_repository;
mod question_repository;
mod questions_command;
mod questions_query;

#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerRepository, AnswerRepositoryError};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionRepository, QuestionRepositoryError};
#[cfg(test)]
pub use questions_command::MockQuestionsCommand;
pub use questions_command::{CreateAnswerRequest, CreateQuestionRequest, QuestionsCommand};
#[cfg(test)]
pub use questions_query::MockQuestionsQuery;
pub use questions_query::{QuestionWithAnswers, QuestionsQuery};
