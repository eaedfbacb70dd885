//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_http_requests_total` (counter): inbound requests by route
//! - `relay_rosbridge_calls_total` (counter): bridge calls by outcome
//! - `relay_rosbridge_call_duration_seconds` (histogram): bridge round trip latency
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_http_request(route: &'static str) {
    ::metrics::counter!("relay_http_requests_total", "route" => route).increment(1);
}

pub fn record_rosbridge_call(success: bool, start: Instant) {
    let outcome = if success { "success" } else { "failure" };
    ::metrics::counter!("relay_rosbridge_calls_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("relay_rosbridge_call_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
