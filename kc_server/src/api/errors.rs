//! Mapping engine errors onto HTTP responses.

use axum::{http::StatusCode, response::Json};
use knockout_cup::TournamentError;
use serde::Serialize;

/// Error response body
///
/// `kind` is stable and meant for programs; `error` is for people.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Status code for an engine error
///
/// - `401` bad authorization code
/// - `404` unknown match or player
/// - `422` malformed input (scores, penalty winner, settings)
/// - `409` the request conflicts with the tournament's current state
/// - `500` storage failures
pub fn status_for(err: &TournamentError) -> StatusCode {
    match err {
        TournamentError::Unauthorized => StatusCode::UNAUTHORIZED,
        TournamentError::MatchNotFound(_) | TournamentError::PlayerNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        TournamentError::InvalidScore { .. }
        | TournamentError::InvalidWinner { .. }
        | TournamentError::InvalidSettings(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TournamentError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TournamentError::InsufficientPlayers { .. }
        | TournamentError::MatchAlreadyDecided(_)
        | TournamentError::LegOutOfOrder { .. }
        | TournamentError::NotPendingPenalties(_)
        | TournamentError::PhaseNotReady { .. }
        | TournamentError::AlreadyFinal
        | TournamentError::AlreadyStarted
        | TournamentError::NotInProgress
        | TournamentError::RosterLocked => StatusCode::CONFLICT,
    }
}

/// Convert an engine error into a response, logging server-side failures
pub fn api_error(err: TournamentError) -> ApiError {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(kind = err.kind(), "Tournament operation failed: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
            kind: err.kind(),
        }),
    )
}
