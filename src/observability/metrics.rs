//! Metrics collection and exposition.
//!
//! # Metrics
//! - `firewall_requests_total` (counter): requests by method, status, outcome
//! - `firewall_request_duration_seconds` (histogram): latency by outcome
//! - `firewall_rejections_total` (counter): rejections by stage and reason
//! - `firewall_upstream_errors_total` (counter): failed exchanges by kind
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::FirewallError;
use crate::inspect::RejectReason;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, outcome: &'static str, start: Instant) {
    counter!(
        "firewall_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("firewall_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rejection(reason: RejectReason) {
    counter!(
        "firewall_rejections_total",
        "stage" => reason.stage(),
        "reason" => reason.as_str()
    )
    .increment(1);
}

pub fn record_upstream_error(error: &FirewallError) {
    counter!("firewall_upstream_errors_total", "kind" => error.kind()).increment(1);
}
