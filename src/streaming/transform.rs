//! Per-chunk transform stages.

use axum::body::Bytes;

use crate::observability::metrics;
use crate::streaming::StreamError;

/// A deterministic chunk-to-chunk transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Parse the chunk as a number and emit its negation.
    Invert,
}

impl Transform {
    pub fn apply(&self, chunk: Bytes) -> Result<Bytes, StreamError> {
        match self {
            Transform::Invert => invert(&chunk),
        }
    }
}

fn invert(chunk: &[u8]) -> Result<Bytes, StreamError> {
    let text = String::from_utf8_lossy(chunk);
    let trimmed = text.trim();

    let inverted = if let Some(negated) = trimmed.parse::<i64>().ok().and_then(i64::checked_neg) {
        negated.to_string()
    } else {
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => (-value).to_string(),
            _ => return Err(StreamError::NotANumber(text.into_owned())),
        }
    };

    tracing::debug!(input = %trimmed, output = %inverted, "Chunk inverted");
    metrics::record_stream_chunk("invert");
    Ok(Bytes::from(inverted))
}
