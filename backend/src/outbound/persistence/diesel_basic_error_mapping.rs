//! Translation of pool and Diesel failures into repository errors.
//!
//! Repositories pass their own `Connection` and `Query` constructors so one
//! mapping serves every port error type.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto the repository's connection constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    debug!(error = %error, "database pool checkout failed");
    connection(error.message().to_owned())
}

/// Map a Diesel failure onto query or connection constructors.
///
/// The driver message is passed through so callers see the underlying
/// reason.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "database statement failed");
            query(info.message().to_owned())
        }
        DieselError::NotFound => query("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            query(other.to_string())
        }
    }
}

/// Whether the failure is a unique constraint violation.
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
