//! users-api server.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                      users-api                        │
//!                  │                                                       │
//!   API request    │  ┌────────┐   ┌────────────┐   ┌───────┐   ┌───────┐ │
//!  ────────────────┼─▶│ server │──▶│ body decode│──▶│ route │──▶│handler│ │
//!                  │  └────────┘   └────────────┘   │ table │   └───┬───┘ │
//!                  │                                └───────┘       │     │
//!                  │                                                ▼     │
//!                  │                                        ┌────────────┐│
//!                  │                                        │record store││
//!                  │                                        └────────────┘│
//!   Upload stream  │  ┌────────┐   ┌─────────┐   ┌────────────────────┐   │
//!  ────────────────┼─▶│ stream │──▶│ [invert]│──▶│ buffered/incremental│  │
//!                  │  │ server │   └─────────┘   └────────────────────┘   │
//!                  │  └────────┘                                          │
//!                  └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use users_api::config::loader::load_config;
use users_api::lifecycle::signals;
use users_api::observability::{logging, metrics};
use users_api::{HttpServer, ServiceConfig, Shutdown, StreamServer};

#[derive(Parser)]
#[command(name = "users-api")]
#[command(about = "In-memory users API with a streaming upload demo", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!("users-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        api_address = %config.listener.bind_address,
        stream_address = %config.stream.bind_address,
        stream_policy = ?config.stream.policy,
        stream_invert = config.stream.invert,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let api_listener = TcpListener::bind(&config.listener.bind_address).await?;
    let stream_listener = TcpListener::bind(&config.stream.bind_address).await?;

    let shutdown = Shutdown::new();
    let api = HttpServer::new(config.clone());
    let stream = StreamServer::new(config.stream.clone());

    let api_task = api.run(api_listener, shutdown.subscribe());
    let stream_task = stream.run(stream_listener, shutdown.subscribe());

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::termination().await;
        trigger.trigger();
    });

    tokio::try_join!(api_task, stream_task)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
