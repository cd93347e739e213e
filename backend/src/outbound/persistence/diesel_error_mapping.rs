//! Shared Diesel error mapping for the question and answer repositories.
//!
//! Repositories pass their own connection and query constructors so each
//! keeps its port error type while sharing one classification.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::models::RowConversionError;
use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map Diesel errors into query or connection errors.
///
/// Closed connections and failures to send a command are connection
/// problems; everything else, including `NotFound`, is a query failure.
pub(crate) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            info,
        ) => connection(info.message().to_owned()),
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        DieselError::NotFound => query("record not found".to_owned()),
        _ => query(error_message),
    }
}

/// Whether the error is a foreign key violation on `constraint`.
///
/// PostgreSQL reports the constraint name; when the driver omits it any
/// foreign key violation matches.
pub(crate) fn is_foreign_key_violation(error: &DieselError, constraint: &str) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => info
            .constraint_name()
            .is_none_or(|name| name == constraint),
        _ => false,
    }
}

/// Map a row conversion failure into a query error.
pub(crate) fn map_row_error<E, Q>(error: RowConversionError, query: Q) -> E
where
    Q: FnOnce(String) -> E,
{
    debug!(%error, "row conversion failed");
    query(error.to_string())
}
