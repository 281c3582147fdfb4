//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request-id + trace layers)
//!     → request.rs (drain body, decode JSON, build RequestContext)
//!     → routing (exact method + path lookup)
//!     → handler (reads/writes RecordStore) or 404
//!     → response.rs (status, JSON body, headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{BodyError, RequestContext, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
