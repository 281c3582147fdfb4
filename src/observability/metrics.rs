//! Metrics collection and exposition.
//!
//! # Metrics
//! - `users_api_requests_total` (counter): requests by method, status
//! - `users_api_request_duration_seconds` (histogram): dispatch latency
//! - `users_api_records` (gauge): rows per table
//! - `users_api_stream_chunks_total` (counter): chunks by pipeline stage

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Failures are logged; the service keeps running without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "users_api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "users_api_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the current size of a table.
pub fn record_table_size(table: &str, rows: usize) {
    metrics::gauge!("users_api_records", "table" => table.to_string()).set(rows as f64);
}

/// Record one chunk passing through a pipeline stage.
pub fn record_stream_chunk(stage: &'static str) {
    metrics::counter!("users_api_stream_chunks_total", "stage" => stage).increment(1);
}
