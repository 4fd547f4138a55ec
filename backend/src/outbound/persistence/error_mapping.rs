//! Shared Diesel and pool error mapping for repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{ExercisePersistenceError, UserPersistenceError};

use super::pool::PoolError;

/// Repository error enums that distinguish connectivity from query failures.
pub(crate) trait RepositoryError {
    fn from_connection_failure(message: String) -> Self;
    fn from_query_failure(message: String) -> Self;
}

impl RepositoryError for UserPersistenceError {
    fn from_connection_failure(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query_failure(message: String) -> Self {
        Self::query(message)
    }
}

impl RepositoryError for ExercisePersistenceError {
    fn from_connection_failure(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query_failure(message: String) -> Self {
        Self::query(message)
    }
}

/// Pool failures always surface as connection errors.
pub(crate) fn map_pool_error<E: RepositoryError>(error: PoolError) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    E::from_connection_failure(message)
}

/// Map Diesel errors without leaking driver messages to callers.
pub(crate) fn map_diesel_error<E: RepositoryError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => E::from_query_failure("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::from_connection_failure("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            E::from_query_failure("duplicate record".to_owned())
        }
        _ => E::from_query_failure("database error".to_owned()),
    }
}
