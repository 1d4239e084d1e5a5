//! Diesel and pool failure classification shared by every repository.
//!
//! Adapters pass their own error constructors, so each port keeps its typed
//! error enum while the classification rules live in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// How a Diesel failure should surface to the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped or could not be used.
    Connection,
    /// A foreign key constraint rejected the write.
    ForeignKey,
    /// A CHECK constraint rejected the written values.
    CheckViolation,
    /// Anything else the database or query builder reported.
    Query,
}

/// Classify `error`, logging the database detail at debug level.
pub(crate) fn classify(error: &DieselError, operation: &'static str) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
            match kind {
                DatabaseErrorKind::ClosedConnection => DieselFailure::Connection,
                DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKey,
                DatabaseErrorKind::CheckViolation => DieselFailure::CheckViolation,
                _ => DieselFailure::Query,
            }
        }
        other => {
            debug!(error = %other, operation, "diesel operation failed");
            DieselFailure::Query
        }
    }
}

/// Map a checkout or build failure through the port's connection constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel failures where a foreign key violation has no special meaning.
pub(crate) fn map_basic_diesel_error<E>(
    error: &DieselError,
    operation: &'static str,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match classify(error, operation) {
        DieselFailure::Connection => connection(format!("{operation}: database connection error")),
        DieselFailure::ForeignKey | DieselFailure::CheckViolation | DieselFailure::Query => {
            query(format!("{operation}: database error"))
        }
    }
}
