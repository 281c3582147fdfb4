//! Minimal users API over an in-memory record store, plus a byte-stream
//! pipeline demo.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;
pub mod streaming;
pub mod users;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::RecordStore;
pub use streaming::StreamServer;
