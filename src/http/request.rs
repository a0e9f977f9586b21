//! Request ID assignment.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) or adopt the client's `x-request-id`
//! - Attach it to the request as an extension and to the tracing span
//! - Echo it back on the response
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The ID is never written into the request headers, so the described
//!   headers are exactly the ones the client sent

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Longest client-supplied ID that is adopted as-is.
const MAX_INCOMING_ID_LEN: usize = 128;

/// Correlation ID for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_incoming(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?.trim();
        if value.is_empty() || value.len() > MAX_INCOMING_ID_LEN {
            return None;
        }
        Some(Self(value.to_string()))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assign a request ID, run the rest of the stack inside a span carrying it,
/// and copy it onto the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(RequestId::from_incoming)
        .unwrap_or_default();

    request.extensions_mut().insert(id.clone());

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %request.method(),
        path = %request.uri().path()
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }

    response
}
