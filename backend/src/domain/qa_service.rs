//! Question and answer domain service.
//!
//! Implements the [`QuestionsCommand`] and [`QuestionsQuery`] driving ports on
//! top of the question and answer repositories. Timestamps come from the
//! injected clock; repository failures are classified into domain errors with
//! the failing operation as context.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, CreateAnswerRequest, CreateQuestionRequest,
    QuestionRepository, QuestionRepositoryError, QuestionWithAnswers, QuestionsCommand,
    QuestionsQuery,
};
use crate::domain::validation::FIELD_TEXT;
use crate::domain::{
    Answer, AnswerId, AnswerText, Error, FieldErrors, NewAnswer, NewQuestion, Question,
    QuestionId, QuestionText, Violation,
};

fn map_question_error(op: &'static str, error: QuestionRepositoryError) -> Error {
    error!(op, %error, "question repository failed");
    match error {
        QuestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{op}: {message}"))
        }
        QuestionRepositoryError::Query { message } => Error::internal(format!("{op}: {message}")),
    }
}

fn map_answer_error(op: &'static str, error: AnswerRepositoryError) -> Error {
    match error {
        AnswerRepositoryError::QuestionNotFound { question_id } => {
            warn!(op, question_id, "answer references a missing question");
            question_not_found(QuestionId::new(question_id))
        }
        AnswerRepositoryError::Connection { message } => {
            error!(op, %message, "answer repository unavailable");
            Error::service_unavailable(format!("{op}: {message}"))
        }
        AnswerRepositoryError::Query { message } => {
            error!(op, %message, "answer repository failed");
            Error::internal(format!("{op}: {message}"))
        }
    }
}

fn question_not_found(id: QuestionId) -> Error {
    Error::not_found(format!("question {id} not found"))
}

fn answer_not_found(id: AnswerId) -> Error {
    Error::not_found(format!("answer {id} not found"))
}

fn text_violation(violation: Violation) -> Error {
    Error::validation(FieldErrors::single(FIELD_TEXT, violation))
}

/// Service orchestrating question and answer use-cases.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::QaService;
/// use backend::outbound::persistence::{
///     DbPool, DieselAnswerRepository, DieselQuestionRepository, PoolConfig,
/// };
/// use mockable::DefaultClock;
///
/// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = DbPool::new(PoolConfig::new("host=localhost dbname=questions")).await?;
/// let _service = QaService::new(
///     Arc::new(DieselQuestionRepository::new(pool.clone())),
///     Arc::new(DieselAnswerRepository::new(pool)),
///     Arc::new(DefaultClock),
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct QaService<Q, A> {
    questions: Arc<Q>,
    answers: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<Q, A> QaService<Q, A> {
    /// Create a service over the given repositories and clock.
    pub fn new(questions: Arc<Q>, answers: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            questions,
            answers,
            clock,
        }
    }
}

impl<Q, A> QaService<Q, A>
where
    Q: QuestionRepository,
    A: AnswerRepository,
{
    async fn require_question(&self, op: &'static str, id: QuestionId) -> Result<Question, Error> {
        self.questions
            .find_by_id(id)
            .await
            .map_err(|err| map_question_error(op, err))?
            .ok_or_else(|| question_not_found(id))
    }
}

#[async_trait]
impl<Q, A> QuestionsCommand for QaService<Q, A>
where
    Q: QuestionRepository,
    A: AnswerRepository,
{
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error> {
        const OP: &str = "create question";
        let text = QuestionText::new(request.text).map_err(text_violation)?;
        let new_question = NewQuestion {
            text,
            created_at: self.clock.utc(),
        };
        let question = self
            .questions
            .create(&new_question)
            .await
            .map_err(|err| map_question_error(OP, err))?;
        info!(op = OP, question_id = question.id.get(), "question created");
        Ok(question)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        const OP: &str = "delete question";
        let deleted = self
            .questions
            .delete_with_answers(id)
            .await
            .map_err(|err| map_question_error(OP, err))?;
        if !deleted {
            return Err(question_not_found(id));
        }
        info!(op = OP, question_id = id.get(), "question deleted");
        Ok(())
    }

    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error> {
        const OP: &str = "create answer";
        let CreateAnswerRequest {
            question_id,
            user_id,
            text,
        } = request;
        let text = AnswerText::new(text).map_err(text_violation)?;
        self.require_question(OP, question_id).await?;

        let new_answer = NewAnswer {
            question_id,
            user_id,
            text,
            created_at: self.clock.utc(),
        };
        let answer = self
            .answers
            .create(&new_answer)
            .await
            .map_err(|err| map_answer_error(OP, err))?;
        info!(
            op = OP,
            answer_id = answer.id.get(),
            question_id = question_id.get(),
            "answer created"
        );
        Ok(answer)
    }

    async fn delete_answer(&self, id: AnswerId) -> Result<(), Error> {
        const OP: &str = "delete answer";
        let deleted = self
            .answers
            .delete(id)
            .await
            .map_err(|err| map_answer_error(OP, err))?;
        if !deleted {
            return Err(answer_not_found(id));
        }
        info!(op = OP, answer_id = id.get(), "answer deleted");
        Ok(())
    }
}

#[async_trait]
impl<Q, A> QuestionsQuery for QaService<Q, A>
where
    Q: QuestionRepository,
    A: AnswerRepository,
{
    async fn list_questions(&self) -> Result<Vec<Question>, Error> {
        self.questions
            .list()
            .await
            .map_err(|err| map_question_error("list questions", err))
    }

    async fn get_question_with_answers(
        &self,
        id: QuestionId,
    ) -> Result<QuestionWithAnswers, Error> {
        const OP: &str = "get question";
        let question = self.require_question(OP, id).await?;
        let answers = self
            .answers
            .list_for_question(id)
            .await
            .map_err(|err| map_answer_error(OP, err))?;
        Ok(QuestionWithAnswers { question, answers })
    }

    async fn get_answer(&self, id: AnswerId) -> Result<Answer, Error> {
        self.answers
            .find_by_id(id)
            .await
            .map_err(|err| map_answer_error("get answer", err))?
            .ok_or_else(|| answer_not_found(id))
    }
}

#[cfg(test)]
#[path = "qa_service_tests.rs"]
mod tests;
