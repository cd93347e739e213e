//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, QuestionRepository, QuestionRepositoryError,
};
use crate::domain::{Answer, AnswerId, NewAnswer, NewQuestion, Question, QuestionId};

/// Timestamp returned by [`fixed_clock`].
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .unwrap_or_default()
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Freeze the clock at `utc_now`.
    pub fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock frozen at [`fixture_timestamp`].
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::new(fixture_timestamp()))
}

#[derive(Debug, Default)]
struct Store {
    questions: BTreeMap<u64, Question>,
    answers: BTreeMap<u64, Answer>,
    next_question_id: u64,
    next_answer_id: u64,
    unavailable: bool,
}

/// In-memory implementation of both repositories.
///
/// Identifiers start at 1 and are never reused, matching `BIGSERIAL`
/// columns. Creating an answer for a missing question fails the same way a
/// foreign key violation does in PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryQaRepository {
    store: Mutex<Store>,
}

impl InMemoryQaRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of stored questions.
    pub fn question_count(&self) -> usize {
        self.lock().questions.len()
    }

    /// Number of stored answers.
    pub fn answer_count(&self) -> usize {
        self.lock().answers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn available(&self) -> Result<MutexGuard<'_, Store>, String> {
        let store = self.lock();
        if store.unavailable {
            Err("in-memory store is unavailable".to_owned())
        } else {
            Ok(store)
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQaRepository {
    async fn list(&self) -> Result<Vec<Question>, QuestionRepositoryError> {
        let store = self.available().map_err(QuestionRepositoryError::connection)?;
        Ok(store.questions.values().cloned().collect())
    }

    async fn create(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError> {
        let mut store = self.available().map_err(QuestionRepositoryError::connection)?;
        store.next_question_id += 1;
        let id = store.next_question_id;
        let created = Question::from_new(QuestionId::new(id), question.clone());
        store.questions.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, QuestionRepositoryError> {
        let store = self.available().map_err(QuestionRepositoryError::connection)?;
        Ok(store.questions.get(&id.get()).cloned())
    }

    async fn delete_with_answers(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError> {
        let mut store = self.available().map_err(QuestionRepositoryError::connection)?;
        if store.questions.remove(&id.get()).is_none() {
            return Ok(false);
        }
        store.answers.retain(|_, answer| answer.question_id != id);
        Ok(true)
    }
}

#[async_trait]
impl AnswerRepository for InMemoryQaRepository {
    async fn create(&self, answer: &NewAnswer) -> Result<Answer, AnswerRepositoryError> {
        let mut store = self.available().map_err(AnswerRepositoryError::connection)?;
        if !store.questions.contains_key(&answer.question_id.get()) {
            return Err(AnswerRepositoryError::question_not_found(
                answer.question_id.get(),
            ));
        }
        store.next_answer_id += 1;
        let id = store.next_answer_id;
        let created = Answer::from_new(AnswerId::new(id), answer.clone());
        store.answers.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        let store = self.available().map_err(AnswerRepositoryError::connection)?;
        Ok(store.answers.get(&id.get()).cloned())
    }

    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let store = self.available().map_err(AnswerRepositoryError::connection)?;
        Ok(store
            .answers
            .values()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: AnswerId) -> Result<bool, AnswerRepositoryError> {
        let mut store = self.available().map_err(AnswerRepositoryError::connection)?;
        Ok(store.answers.remove(&id.get()).is_some())
    }
}
