//! Slow counting source.

use std::time::Duration;

use axum::body::Bytes;
use futures_util::Stream;

use crate::streaming::{Chunk, StreamError};

/// Producer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerState {
    Idle,
    Producing,
    Closed,
}

/// Emits `"1"`, `"2"`, ... `"N"`, one chunk per tick, then `Chunk::End`.
#[derive(Debug)]
pub struct CountingProducer {
    next: u64,
    last: u64,
    tick: Duration,
    state: ProducerState,
}

impl CountingProducer {
    /// Count from 1 to `last` inclusive, waiting `tick` before each chunk.
    pub fn new(last: u64, tick: Duration) -> Self {
        Self {
            next: 1,
            last,
            tick,
            state: ProducerState::Idle,
        }
    }

    pub fn state(&self) -> ProducerState {
        self.state
    }

    /// Wait one tick and emit the next number, or `End` once past `last`.
    pub async fn pull(&mut self) -> Chunk {
        match self.state {
            ProducerState::Closed => return Chunk::End,
            ProducerState::Idle => self.state = ProducerState::Producing,
            ProducerState::Producing => {}
        }

        if self.next > self.last {
            self.state = ProducerState::Closed;
            return Chunk::End;
        }

        tokio::time::sleep(self.tick).await;
        let value = self.next;
        self.next += 1;
        Chunk::Data(Bytes::from(value.to_string()))
    }

    /// Adapt into a `Stream` of bytes, e.g. for an HTTP request body.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, StreamError>> + Send + 'static {
        futures_util::stream::unfold(self, |mut producer| async move {
            match producer.pull().await {
                Chunk::Data(bytes) => Some((Ok(bytes), producer)),
                Chunk::End => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn counts_then_ends() {
        let mut producer = CountingProducer::new(3, Duration::from_millis(100));
        assert_eq!(producer.state(), ProducerState::Idle);

        assert_eq!(producer.pull().await, Chunk::Data(Bytes::from("1")));
        assert_eq!(producer.state(), ProducerState::Producing);
        assert_eq!(producer.pull().await, Chunk::Data(Bytes::from("2")));
        assert_eq!(producer.pull().await, Chunk::Data(Bytes::from("3")));
        assert_eq!(producer.pull().await, Chunk::End);
        assert_eq!(producer.state(), ProducerState::Closed);

        // closed for good
        assert_eq!(producer.pull().await, Chunk::End);
    }

    #[tokio::test(start_paused = true)]
    async fn each_chunk_waits_one_tick() {
        let start = tokio::time::Instant::now();
        let mut producer = CountingProducer::new(5, Duration::from_millis(100));
        while producer.pull().await != Chunk::End {}
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(600), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn zero_count_ends_immediately() {
        let mut producer = CountingProducer::new(0, Duration::from_secs(1));
        assert_eq!(producer.pull().await, Chunk::End);
        assert_eq!(producer.state(), ProducerState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn stream_adapter_yields_numbers() {
        let chunks: Vec<_> = CountingProducer::new(4, Duration::from_millis(10))
            .into_stream()
            .map(|c| c.unwrap())
            .collect()
            .await;
        assert_eq!(chunks, vec!["1", "2", "3", "4"]);
    }
}
