//! Response mapping for hosting-layer failures.
//!
//! # Responsibilities
//! - Map body read errors to HTTP status codes
//!
//! # Design Decisions
//! - Oversized bodies result in 413 Payload Too Large
//! - Broken body streams result in 400 Bad Request
//! - Malformed (non-JSON) bodies never reach here; they are described, not rejected

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::describe::BodyError;

impl BodyError {
    pub fn status(&self) -> StatusCode {
        match self {
            BodyError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            BodyError::Read(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = %status, error = %self, "Rejecting request body");
        (status, self.to_string()).into_response()
    }
}
