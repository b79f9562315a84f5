//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use powerpath_core::error::GuideError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The embedded guide failed to compile.
    #[error("content error: {0}")]
    Content(#[from] powerpath_content::ContentError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `GuideError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub GuideError);

impl From<GuideError> for ApiError {
    fn from(err: GuideError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            GuideError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            GuideError::TransitionPending => (StatusCode::CONFLICT, "transition_pending"),
            GuideError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            GuideError::BrokenGraph(_) => (StatusCode::INTERNAL_SERVER_ERROR, "broken_graph"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
