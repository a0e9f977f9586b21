//! Request body reading and classification.
//!
//! # Responsibilities
//! - Read the body stream once, enforcing the configured size limit
//! - Try a structured (JSON) parse first
//! - Fall back to raw text, or null for an empty body
//!
//! # Design Decisions
//! - Parse failure is data, not an error: it selects the fallback branch
//! - Content type is not consulted; any body that parses as JSON is JSON
//! - Fallback text is decoded lossily (invalid UTF-8 becomes U+FFFD)
//! - Read failures are transport problems and surface as `BodyError`

use axum::body::Body;
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// What a request body turned out to be.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BodyContent {
    /// Body parsed as a JSON document of any kind, scalars included.
    Json(Value),
    /// Non-empty body that is not JSON.
    Text(String),
    /// Zero bytes. Serializes as `null`.
    Empty,
}

impl BodyContent {
    /// Classify raw body bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match parse_structured(bytes) {
            Ok(value) => BodyContent::Json(value),
            Err(e) => {
                tracing::debug!(error = %e, len = bytes.len(), "Body is not JSON, using raw fallback");
                Self::raw(bytes)
            }
        }
    }

    fn raw(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            BodyContent::Empty
        } else {
            BodyContent::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

fn parse_structured(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    serde_json::from_slice(bytes)
}

/// Failures while reading the body stream itself.
#[derive(Debug, Error)]
pub enum BodyError {
    /// Body exceeded the configured maximum.
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// The underlying stream failed.
    #[error("failed to read request body: {0}")]
    Read(String),
}

/// Read a body stream to completion, failing once it grows past `limit` bytes.
pub async fn read_body(body: Body, limit: usize) -> Result<Vec<u8>, BodyError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| BodyError::Read(e.to_string()))?;
        if buf.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_parses_as_json() {
        assert_eq!(BodyContent::from_bytes(br#"{"a":1}"#), BodyContent::Json(json!({"a": 1})));
    }

    #[test]
    fn test_scalar_json_wins_over_text() {
        assert_eq!(BodyContent::from_bytes(b"42"), BodyContent::Json(json!(42)));
        assert_eq!(BodyContent::from_bytes(b"\"hi\""), BodyContent::Json(json!("hi")));
        assert_eq!(BodyContent::from_bytes(b"null"), BodyContent::Json(Value::Null));
        assert_eq!(BodyContent::from_bytes(b" [true, 1.5] \n"), BodyContent::Json(json!([true, 1.5])));
    }

    #[test]
    fn test_large_numbers_keep_exact_digits() {
        let body = BodyContent::from_bytes(br#"{"id":12345678901234567890123,"x":0.1,"neg":-98765432109876543210}"#);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"id":12345678901234567890123,"x":0.1,"neg":-98765432109876543210}"#
        );
    }

    #[test]
    fn test_bom_prefixed_json_parses() {
        assert_eq!(
            BodyContent::from_bytes(b"\xef\xbb\xbf{\"a\":1}"),
            BodyContent::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn test_plain_text_falls_back() {
        assert_eq!(
            BodyContent::from_bytes(b"hello world"),
            BodyContent::Text("hello world".into())
        );
        assert_eq!(BodyContent::from_bytes(b"{broken"), BodyContent::Text("{broken".into()));
        assert_eq!(BodyContent::from_bytes(b"  "), BodyContent::Text("  ".into()));
    }

    #[test]
    fn test_empty_is_null() {
        assert_eq!(BodyContent::from_bytes(b""), BodyContent::Empty);
        assert_eq!(serde_json::to_value(BodyContent::Empty).unwrap(), Value::Null);
    }

    #[test]
    fn test_invalid_utf8_decodes_lossily() {
        assert_eq!(
            BodyContent::from_bytes(b"ab\xffcd"),
            BodyContent::Text("ab\u{FFFD}cd".into())
        );
    }

    #[test]
    fn test_serialized_shapes() {
        assert_eq!(serde_json::to_value(BodyContent::Json(json!({"n": 5}))).unwrap(), json!({"n": 5}));
        assert_eq!(serde_json::to_value(BodyContent::Text("x".into())).unwrap(), json!("x"));
    }

    #[tokio::test]
    async fn test_read_body_within_limit() {
        let bytes = read_body(Body::from("hello"), 5).await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_read_body_over_limit() {
        let err = read_body(Body::from("hello!"), 5).await.unwrap_err();
        assert!(matches!(err, BodyError::TooLarge { limit: 5 }));
    }
}
