//! Narrative comparison error types.

use survey_core::errors::CoreError;
use survey_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was configured at startup.
    #[error("AI not configured. Set GEMINI_API_KEY.")]
    NotConfigured,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the model API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The model API answered with an unexpected envelope.
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AiError {
    /// Whether the failure happened talking to the model, as opposed to
    /// configuration or lookup problems.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. } | Self::Parse(_))
    }
}
