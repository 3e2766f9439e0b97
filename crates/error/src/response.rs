//! # API Response Types
//!
//! The JSON envelope used for error responses, and the axum conversion of
//! [`AppError`] into an HTTP response.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "status": "error",
//!   "code": "NOT_FOUND",
//!   "message": "Task not found"
//! }
//! ```

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Message returned in place of server-side error details.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status:  String,
    pub code:    String,
    pub message: String,
}

impl ErrorResponse {
    /// Create an error envelope.
    #[inline]
    pub fn new(code: impl ToString, message: impl ToString) -> Self {
        Self {
            status:  "error".to_string(),
            code:    code.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let message = if err.is_server_error() {
            INTERNAL_MESSAGE.to_string()
        }
        else {
            err.message()
        };
        ErrorResponse::new(err.code(), message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        }
        else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse::from(&self);
        (self.status(), Json(body)).into_response()
    }
}
