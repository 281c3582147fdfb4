//! Response construction helpers.
//!
//! # Responsibilities
//! - Empty-bodied status responses (201, 404, 500)
//! - JSON responses with `content-type: application/json`
//!
//! # Design Decisions
//! - Serialization failures become 500, never a panic

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// A response with the given status and no body.
pub fn empty(status: StatusCode) -> Response {
    status.into_response()
}

/// A JSON response with the given status.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_value(value) {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
