//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pages_requests_total` (counter): requests by method, status, route
//! - `pages_request_duration_seconds` (histogram): latency by route
//! - `pages_short_circuits_total` (counter): chains stopped early, by stage
//! - `pages_seed_runs_total` (counter): bootstrap runs by outcome

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    counter!(
        "pages_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);
    histogram!("pages_request_duration_seconds", "route" => route.to_string()).record(elapsed);
}

pub fn record_short_circuit(stage: &'static str) {
    counter!("pages_short_circuits_total", "stage" => stage).increment(1);
}

pub fn record_seed_run(outcome: &'static str) {
    counter!("pages_seed_runs_total", "outcome" => outcome).increment(1);
}
