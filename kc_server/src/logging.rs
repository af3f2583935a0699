//! Structured logging configuration.
//!
//! The engine logs through the `log` facade; the subscriber installed here
//! picks those records up alongside the server's own `tracing` events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,hyper=warn,tower_http=warn";

/// Initialize structured logging
///
/// Log levels come from the `RUST_LOG` env var. Records emitted through the
/// `log` crate are forwarded to the same subscriber.
///
/// # Example
///
/// ```no_run
/// use kc_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // `init` also installs the `log` bridge
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a tournament lifecycle event with structured data
///
/// # Example
///
/// ```
/// use kc_server::logging::log_tournament_event;
///
/// log_tournament_event("phase_advanced", Some(2), "Semi-finals drawn");
/// ```
pub fn log_tournament_event(event_type: &str, phase: Option<u32>, message: &str) {
    tracing::info!(
        event_type = event_type,
        phase = phase,
        "TOURNAMENT: {}",
        message
    );
}

/// Log a rejected organizer action (bad code)
pub fn log_security_event(event_type: &str, request_id: Option<&str>, message: &str) {
    tracing::warn!(
        event_type = event_type,
        request_id = request_id,
        "SECURITY: {}",
        message
    );
}
