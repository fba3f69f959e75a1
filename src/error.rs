//! Error codes and the JSON error response shared by all routes.
//!
//! DESIGN
//! ======
//! Every layer defines its own `thiserror` enum. Each one implements
//! [`ErrorCode`] so a route can turn it into a grepable `E_*` code, a
//! retryable flag, and a user-facing message without knowing the variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// API ERROR
// =============================================================================

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    pub retryable: bool,
}

/// An error already mapped to an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// Build an API error from any coded error and the status it maps to.
    pub fn new<E: ErrorCode>(status: StatusCode, err: &E) -> Self {
        Self {
            status,
            body: ErrorBody { error: err.to_string(), code: err.error_code(), retryable: err.retryable() },
        }
    }

    /// Build an API error with an explicit message and code.
    #[must_use]
    pub fn with_message(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, body: ErrorBody { error: message.into(), code, retryable: false } }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.body.code, error = %self.body.error, "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
