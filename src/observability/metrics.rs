//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_submissions_total` (counter): accepted submissions by endpoint
//! - `gateway_rejected_total` (counter): validation rejections by endpoint
//! - `gateway_rate_limited_total` (counter): admission denials by endpoint
//! - `gateway_bot_masked_total` (counter): bot detections masked as success,
//!   by detection reason
//!
//! Exposed in Prometheus format on `observability.metrics_address` when
//! enabled.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::error!(error = %e, "Failed to install metrics exporter");
    } else {
        tracing::info!(address = %addr, "Metrics endpoint started");
    }
}

pub fn record_submission(endpoint: &'static str) {
    counter!("gateway_submissions_total", "endpoint" => endpoint).increment(1);
}

pub fn record_rejected(endpoint: &'static str) {
    counter!("gateway_rejected_total", "endpoint" => endpoint).increment(1);
}

pub fn record_rate_limited(endpoint: &'static str) {
    counter!("gateway_rate_limited_total", "endpoint" => endpoint).increment(1);
}

pub fn record_bot_masked(reason: &'static str) {
    counter!("gateway_bot_masked_total", "reason" => reason).increment(1);
}
