//! Error kinds shared by the domain services.
//!
//! Store failures arrive as `anyhow::Error`; [`ServiceError::from_store`]
//! looks for the underlying [`DbErr`] and picks the matching kind.

use sea_orm::{DbErr, SqlErr};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Short label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Validation(_) => "validation",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal",
        }
    }

    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classifies a store failure. `what` names the record being written,
    /// e.g. `"User 'alice'"`.
    #[must_use]
    pub fn from_store(err: &anyhow::Error, what: &str) -> Self {
        let Some(db_err) = err.chain().find_map(|e| e.downcast_ref::<DbErr>()) else {
            return Self::Internal(format!("{err:#}"));
        };

        match db_err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                return Self::Conflict(format!("{what} already exists"));
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                return Self::Validation(format!("{what} references a missing record"));
            }
            _ => {}
        }

        if matches!(db_err, DbErr::ConnectionAcquire(_) | DbErr::Conn(_)) {
            return Self::Unavailable(db_err.to_string());
        }

        if is_sqlite_check_violation(db_err) {
            return Self::Validation(format!("{what} violates a table constraint"));
        }

        Self::Internal(format!("{err:#}"))
    }
}

/// `sql_err()` has no CHECK variant, so this relies on SQLite's
/// "CHECK constraint failed" message text.
fn is_sqlite_check_violation(db_err: &DbErr) -> bool {
    matches!(db_err, DbErr::Exec(_) | DbErr::Query(_))
        && db_err.to_string().contains("CHECK constraint failed")
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        Self::from_store(&err, "Record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    #[test]
    fn test_non_database_error_is_internal() {
        let err = anyhow::anyhow!("disk on fire");
        assert!(matches!(
            ServiceError::from_store(&err, "User"),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err: anyhow::Result<()> =
            Err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)).context("Failed to query");
        let err = err.unwrap_err();
        assert!(matches!(
            ServiceError::from_store(&err, "User"),
            ServiceError::Unavailable(_)
        ));
    }

    #[test]
    fn test_record_not_found_is_internal() {
        let err = anyhow::Error::new(DbErr::RecordNotFound("users".to_string()));
        assert!(matches!(
            ServiceError::from_store(&err, "User"),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn test_check_violation_is_validation() {
        let err = anyhow::Error::new(DbErr::Exec(RuntimeErr::Internal(
            "CHECK constraint failed: \"start_date\" < \"end_date\"".to_string(),
        )));
        assert!(matches!(
            ServiceError::from_store(&err, "Reservation 1"),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn test_check_text_outside_statement_errors_is_internal() {
        let err = anyhow::Error::new(DbErr::Custom("CHECK constraint failed".to_string()));
        assert!(matches!(
            ServiceError::from_store(&err, "Reservation 1"),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ServiceError::not_found("User", "bob").kind(), "not_found");
        assert_eq!(ServiceError::Conflict(String::new()).kind(), "conflict");
    }

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("Customer", 7);
        assert_eq!(err.to_string(), "Customer 7 not found");
    }
}
