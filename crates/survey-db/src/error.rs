//! Database error types for survey-db.

use survey_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or a row could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The store is not in the state an operation requires.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Domain-level failure (not found, invalid range, validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }

    /// Convert a write error, promoting UNIQUE violations to [`Self::Conflict`].
    pub(crate) fn from_write(err: libsql::Error, what: &str) -> Self {
        let message = err.to_string();
        if message.contains("UNIQUE constraint failed") {
            Self::Conflict(format!("{what} already exists"))
        } else {
            Self::LibSql(err)
        }
    }
}
