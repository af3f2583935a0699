//! Tournament lifecycle endpoints.

use super::{
    AppState,
    errors::{ApiError, api_error},
    request_id::RequestId,
    views::{MatchView, PhaseView},
};
use crate::{logging, metrics};
use axum::{extract::State, response::Json};
use knockout_cup::{
    Leg, Match, MatchId, PlayerId, Rankings, TournamentError, TournamentOverview,
};
use serde::{Deserialize, Serialize};

/// Request body for start and reset
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCodeRequest {
    pub auth_code: String,
}

/// Request body for recording one leg
///
/// Goals are taken as signed integers so that a negative score reaches the
/// engine and is rejected with a proper `InvalidScore`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterScoreRequest {
    pub match_id: MatchId,
    pub leg: Leg,
    #[serde(rename = "goalsP1")]
    pub goals_p1: i64,
    #[serde(rename = "goalsP2")]
    pub goals_p2: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWinnerRequest {
    pub match_id: MatchId,
    pub winner_id: PlayerId,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResponse {
    pub message: String,
    pub phase: PhaseView,
    /// Seed of the opening draw, only on start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub message: String,
    #[serde(rename = "match")]
    pub fixture: MatchView,
    /// Set when this result decided the final
    pub tournament_finished: bool,
}

/// Tournament summary: status, pool, current phase and podium.
pub async fn status(State(state): State<AppState>) -> Json<TournamentOverview> {
    Json(state.manager.overview().await)
}

/// Draw the bracket and start the tournament.
///
/// # Request Body
///
/// ```json
/// {"authCode": "1234"}
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Wrong authorization code
/// - `409 Conflict`: Already started, or fewer than two confirmed players
/// - `422 Unprocessable Entity`: Settings rejected
pub async fn start(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<AuthCodeRequest>,
) -> Result<Json<PhaseResponse>, ApiError> {
    let tournament = match state.manager.start(&request.auth_code).await {
        Ok(tournament) => tournament,
        Err(e) => return Err(rejected(e, &request_id, "Start rejected")),
    };
    let phase = tournament
        .current_phase()
        .ok_or_else(|| api_error(TournamentError::NotInProgress))?;

    metrics::tournaments_started_total();
    logging::log_tournament_event(
        "started",
        Some(phase.number()),
        &format!(
            "Tournament started with {} players",
            tournament.roster().confirmed_count()
        ),
    );

    let message = if phase.is_preliminary() {
        format!(
            "Tournament started: {} play-in match(es), {} bye(s)",
            phase.matches().len(),
            phase.byes().len()
        )
    } else {
        format!("Tournament started: {} match(es)", phase.matches().len())
    };

    Ok(Json(PhaseResponse {
        message,
        phase: PhaseView::new(phase, tournament.roster()),
        draw_seed: tournament.draw_seed(),
    }))
}

/// Phase being played, `null` before the start.
pub async fn current_phase(State(state): State<AppState>) -> Json<Option<PhaseView>> {
    let tournament = state.manager.snapshot().await;
    Json(
        tournament
            .current_phase()
            .map(|phase| PhaseView::new(phase, tournament.roster())),
    )
}

/// Every phase so far, oldest first.
pub async fn phases(State(state): State<AppState>) -> Json<Vec<PhaseView>> {
    let tournament = state.manager.snapshot().await;
    Json(
        tournament
            .phases()
            .iter()
            .map(|phase| PhaseView::new(phase, tournament.roster()))
            .collect(),
    )
}

/// Matches of the current phase with a leg still to record.
pub async fn next_matches(State(state): State<AppState>) -> Json<Vec<MatchView>> {
    let tournament = state.manager.snapshot().await;
    Json(
        tournament
            .next_matches()
            .iter()
            .map(|next| MatchView::new(&next.fixture, tournament.roster()))
            .collect(),
    )
}

/// Record one leg's score.
///
/// # Request Body
///
/// ```json
/// {"matchId": 1, "leg": "first", "goalsP1": 2, "goalsP2": 1}
/// ```
///
/// `leg` also accepts `"ida"` and `"volta"`.
///
/// # Errors
///
/// - `404 Not Found`: Unknown match
/// - `409 Conflict`: Leg out of order, or match already decided
/// - `422 Unprocessable Entity`: Negative goals
pub async fn register_score(
    State(state): State<AppState>,
    Json(request): Json<RegisterScoreRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let fixture = state
        .manager
        .register_score(
            request.match_id,
            request.leg,
            request.goals_p1,
            request.goals_p2,
        )
        .await
        .map_err(api_error)?;

    metrics::scores_registered_total(&request.leg.to_string());

    let message = if fixture.is_pending_penalty() {
        "Score recorded: aggregate level, penalty winner required".to_string()
    } else {
        "Score recorded".to_string()
    };

    Ok(Json(match_response(&state, fixture, message).await))
}

/// Settle a level tie with the penalty shootout winner.
///
/// # Request Body
///
/// ```json
/// {"matchId": 2, "winnerId": 3}
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Unknown match
/// - `409 Conflict`: The match is not waiting for penalties
/// - `422 Unprocessable Entity`: The winner is not playing this match
pub async fn set_winner(
    State(state): State<AppState>,
    Json(request): Json<SetWinnerRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let fixture = state
        .manager
        .set_penalty_winner(request.match_id, request.winner_id)
        .await
        .map_err(api_error)?;

    metrics::penalty_decisions_total();

    Ok(Json(
        match_response(&state, fixture, "Penalty winner recorded".to_string()).await,
    ))
}

/// Move on to the next phase.
///
/// # Errors
///
/// - `409 Conflict`: Undecided matches remain, the current phase is the
///   final, or the tournament is not running
pub async fn advance_phase(State(state): State<AppState>) -> Result<Json<PhaseResponse>, ApiError> {
    let phase = state.manager.advance_phase().await.map_err(api_error)?;
    let roster = state.manager.roster().await;

    metrics::phases_advanced_total();

    let message = if phase.is_final() {
        "Advanced to the final".to_string()
    } else {
        format!("Advanced to phase {}", phase.number())
    };
    logging::log_tournament_event("phase_advanced", Some(phase.number()), &message);

    Ok(Json(PhaseResponse {
        message,
        phase: PhaseView::new(&phase, &roster),
        draw_seed: None,
    }))
}

/// Ranking tables over confirmed players.
pub async fn rankings(State(state): State<AppState>) -> Json<Rankings> {
    Json(state.manager.rankings().await)
}

/// Throw away the bracket and every total; names and settings stay.
///
/// # Errors
///
/// - `401 Unauthorized`: Wrong authorization code
pub async fn reset(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<AuthCodeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if let Err(e) = state.manager.reset(&request.auth_code).await {
        return Err(rejected(e, &request_id, "Reset rejected"));
    }

    metrics::confirmed_players(0);
    logging::log_tournament_event("reset", None, "Tournament reset");

    Ok(Json(MessageResponse {
        message: "Tournament reset".to_string(),
    }))
}

async fn match_response(state: &AppState, fixture: Match, message: String) -> MatchResponse {
    let roster = state.manager.roster().await;
    let tournament_finished = fixture.is_final() && fixture.is_decided();

    if tournament_finished {
        metrics::tournaments_finished_total();
        logging::log_tournament_event(
            "finished",
            Some(fixture.phase()),
            &format!("Final decided in match {}", fixture.id()),
        );
    }

    MatchResponse {
        message,
        fixture: MatchView::new(&fixture, &roster),
        tournament_finished,
    }
}

fn rejected(err: TournamentError, request_id: &RequestId, action: &str) -> ApiError {
    if matches!(err, TournamentError::Unauthorized) {
        logging::log_security_event("bad_auth_code", Some(request_id.as_str()), action);
    }
    api_error(err)
}
