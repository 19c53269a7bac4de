//! Translation of core errors into HTTP responses.
//!
//! Each error kind maps to its own status so clients can tell "wrong key"
//! from "no such note" from "service broken". Bodies carry fixed messages;
//! internal detail goes to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notes_core::{ErrorKind, NotesError};

/// Error returned from API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Map a core error. `validation_message` is the endpoint-specific text
    /// shown for missing input.
    pub fn from_notes(err: NotesError, validation_message: &'static str) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::bad_request(validation_message),
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, "Note not found"),
            ErrorKind::Authorization => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid decryption key")
            }
            ErrorKind::Crypto => {
                tracing::error!(error = %err, "note integrity failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Stored note is corrupted")
            }
            ErrorKind::Persistence => {
                tracing::error!(error = %err, "note store failure");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
