//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use bookstore_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// HTTP-boundary wrapper for [`AppError`].
///
/// Handlers return `Result<_, ApiError>`; the `?` operator converts domain
/// errors via `From`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message) = match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.message),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, err.message),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, err.message),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.message),
            ErrorKind::Conflict => (StatusCode::CONFLICT, err.message),
            // Storage and internal faults are logged server-side and never
            // leak detail to the client.
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}
