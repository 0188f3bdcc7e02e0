//! Metrics collection and exposition.
//!
//! # Metrics
//! - `greeter_requests_total` (counter): requests by method and outcome
//!   (`form`, `greeting`, `validation`)
//!
//! Recording is a no-op until a recorder is installed, so handlers call
//! [`record_request`] unconditionally.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "greeter_requests_total";

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one handled page request.
pub fn record_request(method: &str, outcome: &'static str) {
    ::metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
