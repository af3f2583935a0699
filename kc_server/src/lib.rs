//! HTTP server for the knockout cup engine.
//!
//! Wraps a [`knockout_cup::TournamentManager`] in an axum router, with
//! env-driven configuration, structured logging and optional Prometheus
//! metrics.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
