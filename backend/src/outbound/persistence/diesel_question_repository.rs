//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{NewQuestion, Question, QuestionId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{NewQuestionRow, QuestionRow, RowConversionError, lookup_key};
use super::pool::DbPool;
use super::schema::{answers, questions};

/// Diesel-backed implementation of the question repository.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use backend::outbound::persistence::{DbPool, DieselQuestionRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("host=localhost dbname=questions")).await?;
    /// let repository = DieselQuestionRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    map_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

fn row_error(error: RowConversionError) -> QuestionRepositoryError {
    map_row_error(error, QuestionRepositoryError::query)
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn list(&self) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, QuestionRepositoryError::connection))?;

        let rows: Vec<QuestionRow> = questions::table
            .select(QuestionRow::as_select())
            .order(questions::id.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|row| Question::try_from(row).map_err(row_error))
            .collect()
    }

    async fn create(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, QuestionRepositoryError::connection))?;

        let row: QuestionRow = diesel::insert_into(questions::table)
            .values(NewQuestionRow::from(question))
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Question::try_from(row).map_err(row_error)
    }

    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, QuestionRepositoryError> {
        let Some(key) = lookup_key(id.get()) else {
            return Ok(None);
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, QuestionRepositoryError::connection))?;

        let row: Option<QuestionRow> = questions::table
            .find(key)
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(Question::try_from).transpose().map_err(row_error)
    }

    async fn delete_with_answers(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError> {
        let Some(key) = lookup_key(id.get()) else {
            return Ok(false);
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, QuestionRepositoryError::connection))?;

        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(answers::table.filter(answers::question_id.eq(key)))
                        .execute(conn)
                        .await?;
                    diesel::delete(questions::table.find(key))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Lookups that never reach the database.

    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::QuestionsQuery;
    use crate::domain::{ErrorCode, QaService};
    use crate::outbound::persistence::DieselAnswerRepository;
    use crate::outbound::persistence::pool::unreachable_pool;
    use crate::test_support::fixed_clock;

    #[rstest]
    #[case(1_u64 << 63)]
    #[case(u64::MAX)]
    #[tokio::test]
    async fn ids_beyond_bigint_are_absent(#[case] id: u64) {
        let repository = DieselQuestionRepository::new(unreachable_pool().await);

        let found = repository
            .find_by_id(QuestionId::new(id))
            .await
            .expect("lookup skips the database");
        let deleted = repository
            .delete_with_answers(QuestionId::new(id))
            .await
            .expect("delete skips the database");

        assert!(found.is_none());
        assert!(!deleted);
    }

    #[rstest]
    #[tokio::test]
    async fn in_range_ids_hit_the_pool() {
        let repository = DieselQuestionRepository::new(unreachable_pool().await);

        let err = repository
            .find_by_id(QuestionId::new(1))
            .await
            .expect_err("database is unreachable");

        assert!(matches!(err, QuestionRepositoryError::Connection { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn service_reports_out_of_range_question_as_not_found() {
        let pool = unreachable_pool().await;
        let service = QaService::new(
            Arc::new(DieselQuestionRepository::new(pool.clone())),
            Arc::new(DieselAnswerRepository::new(pool)),
            fixed_clock(),
        );

        let err = service
            .get_question_with_answers(QuestionId::new(u64::MAX))
            .await
            .expect_err("question cannot exist");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
