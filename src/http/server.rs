//! HTTP server setup and the dispatch loop.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all dispatch handler
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener, stop on shutdown signal
//! - Per request: decode body, match route, run handler or answer 404

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::RequestContext;
use crate::http::response;
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::routing::RouteTable;
use crate::store::RecordStore;
use crate::users;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub store: RecordStore,
}

/// HTTP server for the users API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    store: RecordStore,
}

impl HttpServer {
    /// Create a server with a fresh store and the `/users` routes.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_parts(config, users::routes(), RecordStore::new())
    }

    /// Create a server around an existing route table and store.
    pub fn with_parts(config: ServiceConfig, routes: RouteTable, store: RecordStore) -> Self {
        let state = AppState {
            routes: Arc::new(routes),
            store: store.clone(),
        };
        let router = Self::build_router(state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The store backing this server.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signals::shutdown_requested(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The dispatch loop body: one call per request, one response per call.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();

    // 1. Drain and decode the body before anything else sees the request
    let ctx = match RequestContext::read(request).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(method = %method, error = %e, "Failed to read request body");
            metrics::record_request(&method, 500, start_time);
            return response::empty(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    tracing::debug!(
        request_id = %ctx.request_id,
        method = %ctx.method,
        path = %ctx.path,
        "Dispatching request"
    );

    // 2. Match route, 3. run handler or answer 404
    let response = match state.routes.match_route(&ctx.method, &ctx.path) {
        Some(route) => route.handler().handle(&ctx, &state.store),
        None => {
            tracing::debug!(request_id = %ctx.request_id, path = %ctx.path, "No route matched");
            response::empty(StatusCode::NOT_FOUND)
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}
