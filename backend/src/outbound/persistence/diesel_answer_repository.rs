//! PostgreSQL-backed `AnswerRepository` implementation using Diesel ORM.
//!
//! Inserting an answer for a question that no longer exists trips the
//! `answers_question_id_fkey` constraint, reported as
//! [`AnswerRepositoryError::QuestionNotFound`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AnswerRepository, AnswerRepositoryError};
use crate::domain::{Answer, AnswerId, NewAnswer, QuestionId};

use super::diesel_error_mapping::{
    is_foreign_key_violation, map_diesel_error, map_pool_error, map_row_error,
};
use super::models::{AnswerRow, NewAnswerRow, RowConversionError, lookup_key};
use super::pool::DbPool;
use super::schema::answers;

const QUESTION_FOREIGN_KEY: &str = "answers_question_id_fkey";

/// Diesel-backed implementation of the answer repository.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> AnswerRepositoryError {
    map_diesel_error(
        error,
        AnswerRepositoryError::query,
        AnswerRepositoryError::connection,
    )
}

fn row_error(error: RowConversionError) -> AnswerRepositoryError {
    map_row_error(error, AnswerRepositoryError::query)
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn create(&self, answer: &NewAnswer) -> Result<Answer, AnswerRepositoryError> {
        if lookup_key(answer.question_id.get()).is_none() {
            return Err(AnswerRepositoryError::question_not_found(
                answer.question_id.get(),
            ));
        }
        let row = NewAnswerRow::try_from(answer).map_err(row_error)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AnswerRepositoryError::connection))?;

        let inserted: AnswerRow = diesel::insert_into(answers::table)
            .values(&row)
            .returning(AnswerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err, QUESTION_FOREIGN_KEY) {
                    AnswerRepositoryError::question_not_found(answer.question_id.get())
                } else {
                    diesel_error(err)
                }
            })?;

        Answer::try_from(inserted).map_err(row_error)
    }

    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        let Some(key) = lookup_key(id.get()) else {
            return Ok(None);
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AnswerRepositoryError::connection))?;

        let row: Option<AnswerRow> = answers::table
            .find(key)
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(Answer::try_from).transpose().map_err(row_error)
    }

    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let Some(key) = lookup_key(question_id.get()) else {
            return Ok(Vec::new());
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AnswerRepositoryError::connection))?;

        let rows: Vec<AnswerRow> = answers::table
            .filter(answers::question_id.eq(key))
            .select(AnswerRow::as_select())
            .order(answers::id.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|row| Answer::try_from(row).map_err(row_error))
            .collect()
    }

    async fn delete(&self, id: AnswerId) -> Result<bool, AnswerRepositoryError> {
        let Some(key) = lookup_key(id.get()) else {
            return Ok(false);
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AnswerRepositoryError::connection))?;

        let deleted = diesel::delete(answers::table.find(key))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(deleted > 0)
    }
}
