//! Streams a slow counting body to the stream listener.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use users_api::streaming::CountingProducer;

#[derive(Parser)]
#[command(name = "upload-client")]
#[command(about = "Upload a counting stream to the users-api stream listener", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3334")]
    url: String,

    /// Last number to send (counting starts at 1).
    #[arg(short, long, default_value_t = 100)]
    count: u64,

    /// Delay before each chunk, in milliseconds.
    #[arg(short, long, default_value_t = 100)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upload_client=info,users_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let producer = CountingProducer::new(cli.count, Duration::from_millis(cli.delay_ms));

    tracing::info!(url = %cli.url, count = cli.count, delay_ms = cli.delay_ms, "Uploading");

    let res = reqwest::Client::new()
        .post(&cli.url)
        .body(reqwest::Body::wrap_stream(producer.into_stream()))
        .send()
        .await?;

    println!("Response status: {}", res.status());
    println!("Body: {}", res.text().await?);
    Ok(())
}
