//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"detail": "<message>"}` with a status
//! derived from the error's kind. Internal failures are logged and replaced
//! with a generic message.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use survey_ai::AiError;
use survey_core::errors::CoreError;
use survey_core::responses::ErrorDetail;
use survey_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed query parameters, inverted range, failed validation, or
    /// narrative comparison without a configured model.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Unique name already taken.
    #[error("{0}")]
    Conflict(String),

    /// Request body could not be decoded into the expected shape.
    #[error("{0}")]
    Unprocessable(String),

    /// The generative model call failed.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match self {
            Self::Internal(message) => {
                tracing::error!(%message, "request failed");
                "Internal server error".to_string()
            }
            Self::Upstream(message) => {
                tracing::warn!(%message, "model call failed");
                format!("AI comparison failed: {message}")
            }
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Unprocessable(message) => message,
        };
        (status, Json(ErrorDetail { detail })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            e if e.is_client_input() => Self::BadRequest(e.to_string()),
            e => Self::Internal(e.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Core(core) => core.into(),
            DatabaseError::Conflict(message) => Self::Conflict(message),
            e => Self::Internal(e.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::NotConfigured => Self::BadRequest(err.to_string()),
            AiError::Database(db) => db.into(),
            AiError::Core(core) => core.into(),
            e if e.is_upstream() => Self::Upstream(e.to_string()),
            e => Self::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}
