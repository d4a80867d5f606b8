//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce `{"error": ..., "code": ...}`
//! bodies with the matching status code.
//!
//! Store failures never reach the client: [`DirectoryResultExt::or_fail`]
//! logs the underlying error and substitutes the route's generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use staffdir_core::DirectoryError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: &'static str,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity or route not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request, or a delete blocked by dependents (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500). Carries only the client-safe message.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::InternalError(msg) => {
                msg
            }
        }
    }

    /// Maps a directory error onto the API taxonomy. `failure` is the
    /// generic message returned in place of store errors.
    pub fn from_directory(err: DirectoryError, failure: &str) -> Self {
        match err {
            DirectoryError::Validation(msg) => ApiError::BadRequest(msg),
            DirectoryError::NotFound { entity, .. } => {
                ApiError::NotFound(format!("{} not found", entity))
            }
            DirectoryError::Integrity(reason) => ApiError::BadRequest(reason.message().to_string()),
            DirectoryError::Query(detail) => {
                tracing::error!(error = %detail, "{}", failure);
                ApiError::InternalError(failure.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ApiErrorBody {
            error: self.message().to_string(),
            code,
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Attaches a route's generic failure message to a directory result.
pub trait DirectoryResultExt<T> {
    fn or_fail(self, failure: &str) -> Result<T, ApiError>;
}

impl<T> DirectoryResultExt<T> for Result<T, DirectoryError> {
    fn or_fail(self, failure: &str) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::from_directory(err, failure))
    }
}
