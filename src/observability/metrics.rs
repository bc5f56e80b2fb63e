//! Metrics collection and exposition.
//!
//! # Metrics
//! - `polls_requests_total` (counter): requests by endpoint, status
//! - `polls_request_duration_seconds` (histogram): dispatch latency by endpoint
//! - `polls_unmatched_total` (counter): paths no route matched
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Endpoint label is the `namespace:name` view name, or "none"

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    metrics::counter!(
        "polls_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "polls_request_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a path that matched no route.
pub fn record_unmatched() {
    metrics::counter!("polls_unmatched_total").increment(1);
}
