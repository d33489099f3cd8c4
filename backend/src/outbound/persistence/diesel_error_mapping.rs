//! Shared Diesel error mapping for the persistence adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Flatten a pool failure into its message for a connection-error constructor.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Whether a Diesel failure is a unique-constraint violation.
///
/// Detecting this lets the repositories classify races on the unique
/// indexes as duplicates instead of opaque query failures.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map common Diesel error variants into a stable message, logging detail.
pub(crate) fn diesel_error_message(error: &DieselError, context: &str) -> String {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), context, "diesel operation failed");
        }
        other => debug!(error = %other, context, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            format!("{context}: database connection error")
        }
        _ => format!("{context}: database error"),
    }
}
