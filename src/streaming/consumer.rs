//! Consumers turning a pipeline into an HTTP response.

use axum::body::{Body, Bytes};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::Stream;
use serde::{Deserialize, Serialize};

use crate::streaming::pipeline::Pipeline;
use crate::streaming::{Chunk, StreamError};

/// How the consumer treats the chunk sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerPolicy {
    /// Collect every chunk, answer once at the end.
    #[default]
    Buffered,
    /// Forward each chunk as soon as it arrives.
    Incremental,
}

/// Pull until `End` and concatenate everything.
pub async fn buffer(pipeline: &mut Pipeline) -> Result<Bytes, StreamError> {
    let mut buffer = Vec::new();
    loop {
        match pipeline.pull().await? {
            Chunk::Data(bytes) => buffer.extend_from_slice(&bytes),
            Chunk::End => return Ok(Bytes::from(buffer)),
        }
    }
}

/// Forward chunks one by one; the stream ends with the pipeline's `End`
/// or right after its first error.
pub fn pipe(pipeline: Pipeline) -> impl Stream<Item = Result<Bytes, StreamError>> + Send + 'static {
    futures_util::stream::unfold(Some(pipeline), |pipeline| async move {
        let mut pipeline = pipeline?;
        match pipeline.pull().await {
            Ok(Chunk::Data(bytes)) => Some((Ok(bytes), Some(pipeline))),
            Ok(Chunk::End) => None,
            Err(e) => {
                tracing::error!(error = %e, "Stream failed after response started");
                Some((Err(e), None))
            }
        }
    })
}

/// Consume `pipeline` under `policy` and produce the single response.
pub async fn respond(policy: ConsumerPolicy, mut pipeline: Pipeline) -> Response {
    match policy {
        ConsumerPolicy::Buffered => match buffer(&mut pipeline).await {
            Ok(content) => {
                tracing::info!(bytes = content.len(), "Stream finished");
                (StatusCode::OK, content).into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "Stream failed before response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        ConsumerPolicy::Incremental => Body::from_stream(pipe(pipeline)).into_response(),
    }
}
