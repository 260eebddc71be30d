//! Cross-cutting error types for the survey backend.
//!
//! Domain-specific errors (`DatabaseError`, `AiError`) live in their own
//! crates. The server maps every variant onto an HTTP status.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can be raised by any survey crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// `end_date` precedes `start_date`.
    #[error("end_date must be >= start_date (got start {start}, end {end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Data failed validation (unknown classification, clause mismatch, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required external capability is not configured.
    #[error("Not configured: {0}")]
    Configuration(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether the error was caused by bad client input.
    #[must_use]
    pub const fn is_client_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. } | Self::Validation(_) | Self::Configuration(_)
        )
    }
}
