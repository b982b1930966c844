//! Shared Diesel error mapping for the repositories.
//!
//! Constraint violations the domain cares about are classified first; every
//! other failure collapses to a query or connection error with a generic
//! message, so SQL text never leaks past the adapter.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Integrity constraint a failed write tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique,
    ForeignKey,
}

/// Classify a Diesel error as a unique or foreign key violation.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Some(ConstraintViolation::Unique)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            Some(ConstraintViolation::ForeignKey)
        }
        _ => None,
    }
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}
