//! Stream demo listener.
//!
//! Accepts any request and treats its body as the chunk stream.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::StreamConfig;
use crate::lifecycle::signals;
use crate::streaming::consumer;
use crate::streaming::pipeline::Pipeline;
use crate::streaming::transform::Transform;

/// HTTP server for the stream demo.
pub struct StreamServer {
    router: Router,
    config: StreamConfig,
}

impl StreamServer {
    pub fn new(config: StreamConfig) -> Self {
        let router = Router::new()
            .fallback(consume_upload)
            .with_state(config.clone())
            .layer(TraceLayer::new_for_http());
        Self { router, config }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            policy = ?self.config.policy,
            invert = self.config.invert,
            "Stream server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signals::shutdown_requested(shutdown))
            .await?;

        tracing::info!("Stream server stopped");
        Ok(())
    }
}

async fn consume_upload(State(config): State<StreamConfig>, request: Request<Body>) -> Response {
    tracing::info!(method = %request.method(), path = %request.uri().path(), "Stream connection received");

    let mut pipeline = Pipeline::from_body(request.into_body());
    if config.invert {
        pipeline = pipeline.with_transform(Transform::Invert);
    }

    consumer::respond(config.policy, pipeline).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::ConsumerPolicy;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use futures_util::stream;
    use tower::ServiceExt;

    fn upload(frames: &[&'static str]) -> Request<Body> {
        let frames: Vec<Result<Bytes, std::io::Error>> = frames
            .iter()
            .map(|f| Ok(Bytes::from_static(f.as_bytes())))
            .collect();
        Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from_stream(stream::iter(frames)))
            .unwrap()
    }

    async fn call(config: StreamConfig, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = StreamServer::new(config).router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn buffered_echo() {
        let (status, body) = call(StreamConfig::default(), upload(&["1", "2", "3"])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "123");
    }

    #[tokio::test]
    async fn incremental_inverted() {
        let config = StreamConfig {
            policy: ConsumerPolicy::Incremental,
            invert: true,
            ..StreamConfig::default()
        };
        let (status, body) = call(config, upload(&["1", "2", "3"])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "-1-2-3");
    }

    #[tokio::test]
    async fn buffered_inverted_non_numeric_fails() {
        let config = StreamConfig {
            invert: true,
            ..StreamConfig::default()
        };
        let (status, body) = call(config, upload(&["1", "two"])).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn empty_upload() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = call(StreamConfig::default(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }
}
