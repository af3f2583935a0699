//! HTTP API for the knockout cup server.
//!
//! A JSON API over a single shared [`TournamentManager`]. The tournament UI is
//! served from another origin, so CORS is permissive.
//!
//! # Modules
//!
//! - [`players`]: Roster listing and confirmation toggles
//! - [`tournament`]: Start, scores, penalties, phases, rankings and reset
//! - [`views`]: Match and phase responses with player names resolved
//! - [`errors`]: Engine error to status code mapping
//! - [`request_id`]: Request correlation ids
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health
//! GET  /api/players
//! POST /api/players/{id}/toggle
//! GET  /api/tournament/status
//! POST /api/tournament/start            {"authCode"}
//! GET  /api/tournament/current-phase
//! GET  /api/tournament/phases
//! GET  /api/tournament/next-matches
//! POST /api/tournament/register-score   {"matchId","leg","goalsP1","goalsP2"}
//! POST /api/tournament/set-winner       {"matchId","winnerId"}
//! POST /api/tournament/advance-phase
//! GET  /api/tournament/rankings
//! POST /api/tournament/reset            {"authCode"}
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use kc_server::api::{AppState, create_router};
//! use knockout_cup::{AuthCode, Roster, TournamentManager, TournamentSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = TournamentManager::in_memory(
//!     Roster::new(["Ana", "Bruno"]),
//!     TournamentSettings::default(),
//!     AuthCode::new("1234"),
//! );
//! let app = create_router(AppState { manager });
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod players;
pub mod request_id;
pub mod tournament;
pub mod views;

use axum::{
    Router,
    extract::{MatchedPath, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use knockout_cup::TournamentManager;
use serde_json::json;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the manager is a handle over shared state.
#[derive(Clone)]
pub struct AppState {
    pub manager: TournamentManager,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let tournament_routes = Router::new()
        .route("/status", get(tournament::status))
        .route("/start", post(tournament::start))
        .route("/current-phase", get(tournament::current_phase))
        .route("/phases", get(tournament::phases))
        .route("/next-matches", get(tournament::next_matches))
        .route("/register-score", post(tournament::register_score))
        .route("/set-winner", post(tournament::set_winner))
        .route("/advance-phase", post(tournament::advance_phase))
        .route("/rankings", get(tournament::rankings))
        .route("/reset", post(tournament::reset));

    let player_routes = Router::new()
        .route("/", get(players::list_players))
        .route("/{player_id}/toggle", post(players::toggle_player));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/tournament", tournament_routes)
        .nest("/api/players", player_routes)
        .route_layer(middleware::from_fn(track_http_metrics))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/health
/// # {"status":"healthy","version":"1.0.0","tournament":"pre-tournament","timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let overview = state.manager.overview().await;

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "tournament": overview.status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Count requests and time them per matched route
async fn track_http_metrics(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    crate::metrics::http_requests_total(&method, &path, response.status().as_u16());
    crate::metrics::http_request_duration_ms(
        &method,
        &path,
        started.elapsed().as_secs_f64() * 1000.0,
    );

    response
}
