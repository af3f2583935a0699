//! Roster endpoints.

use super::{
    AppState,
    errors::{ApiError, api_error},
};
use crate::metrics;
use axum::{
    extract::{Path, State},
    response::Json,
};
use knockout_cup::{Player, PlayerId};

/// List every rostered player with confirmation and running totals.
///
/// # Response
///
/// Returns `200 OK` with the roster in order:
/// ```json
/// [
///   {"id": 1, "name": "Ana", "confirmed": true, "wins": 0, "goals": 0, "earnings": 0}
/// ]
/// ```
///
/// `earnings` is in cents.
pub async fn list_players(State(state): State<AppState>) -> Json<Vec<Player>> {
    Json(state.manager.players().await)
}

/// Flip a player's confirmation.
///
/// # Path Parameters
///
/// - `player_id`: Player ID (integer)
///
/// # Errors
///
/// - `404 Not Found`: Unknown player
/// - `409 Conflict`: The tournament has started and the roster is locked
pub async fn toggle_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> Result<Json<Player>, ApiError> {
    let player = state
        .manager
        .toggle_confirmation(player_id)
        .await
        .map_err(api_error)?;

    tracing::info!(
        player_id = player.id,
        confirmed = player.confirmed,
        "Player confirmation toggled"
    );
    metrics::confirmed_players(state.manager.overview().await.confirmed_count);

    Ok(Json(player))
}
