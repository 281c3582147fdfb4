//! Request ingestion and body decoding.
//!
//! # Responsibilities
//! - Drain the full request body, chunk by chunk
//! - Decode the concatenated bytes as JSON
//! - Substitute `Value::Null` when the body is empty or not JSON
//! - Expose routing-relevant fields (method, path) to the dispatch loop
//!
//! # Design Decisions
//! - The body is decoded exactly once, before any handler runs
//! - Decode failure is not an error; only transport failures are

use axum::body::{Body, Bytes};
use axum::http::{Method, Request};
use futures_util::StreamExt;
use serde_json::Value;
use thiserror::Error;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Failure while reading a request body from the transport.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("request body stream failed after {received} bytes: {source}")]
    Transport {
        received: usize,
        #[source]
        source: axum::Error,
    },
}

/// Everything a handler may look at for one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// URI path, query string excluded.
    pub path: String,
    pub request_id: String,
    pub raw_body: Bytes,
    /// Decoded JSON body. `Value::Null` means absent or undecodable.
    pub body: Value,
}

impl RequestContext {
    /// Consume the request: drain and decode its body.
    pub async fn read(request: Request<Body>) -> Result<Self, BodyError> {
        let (parts, body) = request.into_parts();
        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let raw_body = collect_body(body).await?;
        let body = decode_body(&raw_body);

        if body.is_null() && !raw_body.is_empty() {
            tracing::debug!(
                request_id = %request_id,
                bytes = raw_body.len(),
                "Request body is not valid JSON, using null"
            );
        }

        Ok(Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            request_id,
            raw_body,
            body,
        })
    }

    /// Field of an object body; `None` for absent fields and non-object bodies.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_object().and_then(|obj| obj.get(name))
    }
}

/// Accumulate every chunk until the stream ends.
pub async fn collect_body(body: Body) -> Result<Bytes, BodyError> {
    let mut stream = body.into_data_stream();
    let mut buffer = Vec::new();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => buffer.extend_from_slice(&chunk),
            Err(source) => {
                return Err(BodyError::Transport {
                    received: buffer.len(),
                    source,
                })
            }
        }
    }

    Ok(Bytes::from(buffer))
}

/// Decode JSON, falling back to the null sentinel.
pub fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}
