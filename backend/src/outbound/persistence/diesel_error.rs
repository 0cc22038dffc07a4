//! Shared classification of pool and Diesel errors.
//!
//! Repositories translate [`StoreError`] into their own port error enums, so
//! the inspection of Diesel internals happens in exactly one place. Raw
//! database messages are logged here and never forwarded upward.

use tracing::debug;

use super::pool::PoolError;

/// Store-level error classes shared by every repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum StoreError {
    /// The store could not be reached.
    Connection(String),
    /// The statement failed.
    Query(String),
    /// A unique constraint rejected the write; carries the constraint name.
    UniqueViolation(String),
}

/// Classify a pool checkout or build failure.
pub(super) fn classify_pool(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::Connection(message)
        }
    }
}

/// Classify a Diesel execution error.
pub(super) fn classify_diesel(error: diesel::result::Error) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::UniqueViolation(
                info.constraint_name().unwrap_or("unknown").to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::Connection("database connection closed".to_owned())
        }
        DieselError::NotFound => StoreError::Query("record not found".to_owned()),
        _ => StoreError::Query("database error".to_owned()),
    }
}
