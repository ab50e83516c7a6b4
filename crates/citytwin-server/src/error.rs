//! Server error type with HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use citytwin_sensors::SensorError;
use citytwin_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Query matched nothing, or a requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Document or blob store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Sensor registry or telemetry failure.
    #[error("sensor error: {0}")]
    Sensor(#[from] SensorError),

    /// Static file read failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Create a not-found error (404).
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Sensor(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, ApiError>;
