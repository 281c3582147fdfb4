//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use users_api::config::StreamConfig;
use users_api::{HttpServer, ServiceConfig, Shutdown, StreamServer};

/// Start the API server on `addr`; it stops when the returned coordinator fires.
#[allow(dead_code)]
pub async fn start_api(addr: SocketAddr) -> Shutdown {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let listener = TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// Start the stream server on `addr` with the given consumer settings.
#[allow(dead_code)]
pub async fn start_stream(addr: SocketAddr, mut config: StreamConfig) -> Shutdown {
    config.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = StreamServer::new(config);
    let listener = TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// A client that never reuses pooled connections across tests.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
