//! Source + transforms, pulled one chunk at a time.

use axum::body::{Body, BodyDataStream};
use futures_util::StreamExt;

use crate::observability::metrics;
use crate::streaming::producer::CountingProducer;
use crate::streaming::transform::Transform;
use crate::streaming::{Chunk, StreamError};

/// Where chunks come from.
pub enum Source {
    /// Locally generated numbers.
    Producer(CountingProducer),
    /// A request body arriving over the transport.
    Incoming(BodyDataStream),
}

impl Source {
    async fn pull(&mut self) -> Result<Chunk, StreamError> {
        match self {
            Source::Producer(producer) => Ok(producer.pull().await),
            Source::Incoming(stream) => loop {
                match stream.next().await {
                    // Zero-length frames carry no chunk
                    Some(Ok(bytes)) if bytes.is_empty() => continue,
                    Some(Ok(bytes)) => break Ok(Chunk::Data(bytes)),
                    Some(Err(e)) => break Err(StreamError::Transport(e)),
                    None => break Ok(Chunk::End),
                }
            },
        }
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Producer(p) => f.debug_tuple("Producer").field(p).finish(),
            Source::Incoming(_) => f.write_str("Incoming"),
        }
    }
}

/// Where a pipeline is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing pulled yet.
    Idle,
    /// Waiting on the source.
    Producing,
    /// Running transform stages on a chunk.
    Transforming,
    /// A chunk has been handed to the consumer.
    Draining,
    /// End delivered or an error observed.
    Closed,
}

/// A source followed by zero or more transforms.
#[derive(Debug)]
pub struct Pipeline {
    source: Source,
    transforms: Vec<Transform>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            transforms: Vec::new(),
            state: PipelineState::Idle,
        }
    }

    /// Pipeline reading a request body.
    pub fn from_body(body: Body) -> Self {
        Self::new(Source::Incoming(body.into_data_stream()))
    }

    /// Append a transform stage.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Pull the next chunk through every stage.
    pub async fn pull(&mut self) -> Result<Chunk, StreamError> {
        if self.state == PipelineState::Closed {
            return Ok(Chunk::End);
        }

        self.state = PipelineState::Producing;
        let result = match self.source.pull().await {
            Ok(Chunk::Data(bytes)) => {
                metrics::record_stream_chunk("source");
                self.state = PipelineState::Transforming;
                self.transforms
                    .iter()
                    .try_fold(bytes, |bytes, t| t.apply(bytes))
                    .map(Chunk::Data)
            }
            other => other,
        };

        self.state = match result {
            Ok(Chunk::Data(_)) => PipelineState::Draining,
            Ok(Chunk::End) | Err(_) => PipelineState::Closed,
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use futures_util::stream;
    use std::time::Duration;

    fn producer(n: u64) -> Pipeline {
        Pipeline::new(Source::Producer(CountingProducer::new(
            n,
            Duration::from_millis(100),
        )))
    }

    async fn drain(pipeline: &mut Pipeline) -> (Vec<String>, usize) {
        let mut chunks = Vec::new();
        let mut ends = 0;
        loop {
            match pipeline.pull().await.unwrap() {
                Chunk::Data(bytes) => {
                    assert_eq!(ends, 0, "data after end marker");
                    chunks.push(String::from_utf8(bytes.to_vec()).unwrap());
                }
                Chunk::End => {
                    ends += 1;
                    break;
                }
            }
        }
        (chunks, ends)
    }

    #[tokio::test(start_paused = true)]
    async fn producer_order_has_no_gaps() {
        let mut pipeline = producer(100);
        assert_eq!(pipeline.state(), PipelineState::Idle);

        let (chunks, ends) = drain(&mut pipeline).await;
        let expected: Vec<String> = (1..=100).map(|v| v.to_string()).collect();
        assert_eq!(chunks, expected);
        assert_eq!(ends, 1);
        assert_eq!(pipeline.state(), PipelineState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn invert_preserves_length_and_order() {
        let mut pipeline = producer(10).with_transform(Transform::Invert);
        let (chunks, _) = drain(&mut pipeline).await;
        let expected: Vec<String> = (1..=10).map(|v: i64| (-v).to_string()).collect();
        assert_eq!(chunks, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn states_follow_chunk_lifecycle() {
        let mut pipeline = producer(1);
        assert_eq!(pipeline.pull().await.unwrap(), Chunk::Data(Bytes::from("1")));
        assert_eq!(pipeline.state(), PipelineState::Draining);
        assert_eq!(pipeline.pull().await.unwrap(), Chunk::End);
        assert_eq!(pipeline.state(), PipelineState::Closed);
        assert_eq!(pipeline.pull().await.unwrap(), Chunk::End);
    }

    #[tokio::test]
    async fn incoming_body_skips_empty_frames() {
        let frames = vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"7")),
            Ok(Bytes::new()),
            Ok(Bytes::from_static(b"8")),
        ];
        let mut pipeline = Pipeline::from_body(Body::from_stream(stream::iter(frames)))
            .with_transform(Transform::Invert);
        let (chunks, ends) = drain(&mut pipeline).await;
        assert_eq!(chunks, vec!["-7", "-8"]);
        assert_eq!(ends, 1);
    }

    #[tokio::test]
    async fn error_closes_pipeline() {
        let frames = vec![
            Ok(Bytes::from_static(b"1")),
            Err(std::io::Error::other("reset")),
            Ok(Bytes::from_static(b"2")),
        ];
        let mut pipeline = Pipeline::from_body(Body::from_stream(stream::iter(frames)));

        assert_eq!(pipeline.pull().await.unwrap(), Chunk::Data(Bytes::from("1")));
        assert!(matches!(pipeline.pull().await, Err(StreamError::Transport(_))));
        assert_eq!(pipeline.state(), PipelineState::Closed);
        // the chunk after the error is never processed
        assert_eq!(pipeline.pull().await.unwrap(), Chunk::End);
    }

    #[tokio::test]
    async fn transform_error_closes_pipeline() {
        let frames = vec![Ok::<_, std::io::Error>(Bytes::from_static(b"x")), Ok(Bytes::from_static(b"2"))];
        let mut pipeline = Pipeline::from_body(Body::from_stream(stream::iter(frames)))
            .with_transform(Transform::Invert);
        assert!(matches!(pipeline.pull().await, Err(StreamError::NotANumber(_))));
        assert_eq!(pipeline.pull().await.unwrap(), Chunk::End);
    }
}
