//! Prometheus metrics for monitoring the tournament server.
//!
//! Metrics go through the `metrics` facade and are exported in Prometheus text
//! format when a scrape address is configured. Without an exporter installed
//! every recording call is a no-op.
//!
//! # Metrics Categories
//!
//! - **HTTP Metrics**: Request counts and duration by route and status
//! - **Tournament Metrics**: Scores, penalty decisions, phase advances,
//!   starts, finishes and confirmed players
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use kc_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("POST", "/api/tournament/register-score", 200);
//! metrics::confirmed_players(8);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
///
/// # Errors
///
/// Returns a message when the exporter cannot be installed (address in use,
/// recorder already set)
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
///
/// Increments the total HTTP request counter with method, path, and status labels.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Tournament Metrics
// ============================================================================

/// Increment recorded legs counter.
pub fn scores_registered_total(leg: &str) {
    metrics::counter!("scores_registered_total", "leg" => leg.to_string()).increment(1);
}

pub fn penalty_decisions_total() {
    metrics::counter!("penalty_decisions_total").increment(1);
}

pub fn phases_advanced_total() {
    metrics::counter!("phases_advanced_total").increment(1);
}

pub fn tournaments_started_total() {
    metrics::counter!("tournaments_started_total").increment(1);
}

pub fn tournaments_finished_total() {
    metrics::counter!("tournaments_finished_total").increment(1);
}

/// Set current confirmed players count.
pub fn confirmed_players(count: usize) {
    metrics::gauge!("confirmed_players").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter_is_noop() {
        http_requests_total("GET", "/health", 200);
        http_request_duration_ms("GET", "/health", 1.5);
        scores_registered_total("first");
        penalty_decisions_total();
        phases_advanced_total();
        tournaments_started_total();
        tournaments_finished_total();
        confirmed_players(4);
    }
}
