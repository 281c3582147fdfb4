//! Byte-stream pipeline demo.
//!
//! # Data Flow
//! ```text
//! Source ──pull──▶ [Transform]* ──pull──▶ Consumer ──▶ HTTP response
//!   Producer (1..N, one per tick)           Buffered: collect, then answer once
//!   Incoming (request body)                 Incremental: forward each chunk
//! ```
//!
//! # Stream States
//! ```text
//! Idle → Producing → (Transforming) → Draining → Producing ... → Closed
//! ```
//!
//! # Design Decisions
//! - Closed set of stages, connected by an explicit pull protocol
//! - `Chunk::End` is delivered once; a closed pipeline keeps answering `End`
//! - Any error closes the pipeline; nothing is processed afterwards
//! - Chunk order within one stream is never changed

pub mod consumer;
pub mod pipeline;
pub mod producer;
pub mod server;
pub mod transform;

use axum::body::Bytes;
use thiserror::Error;

pub use consumer::ConsumerPolicy;
pub use pipeline::{Pipeline, PipelineState, Source};
pub use producer::CountingProducer;
pub use server::StreamServer;
pub use transform::Transform;

/// One unit pulled from a stream stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// A buffer of bytes.
    Data(Bytes),
    /// No further chunks will follow.
    End,
}

/// Failure that terminates a stream.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("transport error: {0}")]
    Transport(#[source] axum::Error),

    #[error("chunk is not a number: {0:?}")]
    NotANumber(String),
}
