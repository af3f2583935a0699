//! Tournament error types.

use crate::{
    fixture::{Leg, MatchId},
    roster::PlayerId,
    store::StoreError,
};
use thiserror::Error;

/// Tournament errors
///
/// Every error leaves the tournament exactly as it was before the failed
/// operation.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Bad authorization code on start or reset
    #[error("Invalid authorization code")]
    Unauthorized,

    #[error("Insufficient players: need {needed}, have {current}")]
    InsufficientPlayers { needed: usize, current: usize },

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Match {0} is already decided")]
    MatchAlreadyDecided(MatchId),

    /// Second leg before the first, a resubmitted leg, or a second leg on a
    /// single-leg match
    #[error("Leg {leg} cannot be recorded for match {match_id} now")]
    LegOutOfOrder { match_id: MatchId, leg: Leg },

    #[error("Invalid score {player1}-{player2}: goals must be whole numbers from 0 to 999")]
    InvalidScore { player1: i64, player2: i64 },

    #[error("Match {0} is not waiting for a penalty decision")]
    NotPendingPenalties(MatchId),

    #[error("Player {player_id} is not playing match {match_id}")]
    InvalidWinner {
        match_id: MatchId,
        player_id: PlayerId,
    },

    #[error("Phase {phase} is not ready: {pending} match(es) undecided")]
    PhaseNotReady { phase: u32, pending: usize },

    #[error("The final is the last phase; there is nothing to advance to")]
    AlreadyFinal,

    #[error("Tournament already started")]
    AlreadyStarted,

    #[error("Tournament is not in progress")]
    NotInProgress,

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// Confirmations are frozen once the bracket is drawn
    #[error("Roster is locked while a tournament is running")]
    RosterLocked,

    #[error("Invalid tournament settings: {0}")]
    InvalidSettings(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl TournamentError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            TournamentError::Unauthorized => "Unauthorized",
            TournamentError::InsufficientPlayers { .. } => "InsufficientPlayers",
            TournamentError::MatchNotFound(_) => "MatchNotFound",
            TournamentError::MatchAlreadyDecided(_) => "MatchAlreadyDecided",
            TournamentError::LegOutOfOrder { .. } => "LegOutOfOrder",
            TournamentError::InvalidScore { .. } => "InvalidScore",
            TournamentError::NotPendingPenalties(_) => "NotPendingPenalties",
            TournamentError::InvalidWinner { .. } => "InvalidWinner",
            TournamentError::PhaseNotReady { .. } => "PhaseNotReady",
            TournamentError::AlreadyFinal => "AlreadyFinal",
            TournamentError::AlreadyStarted => "AlreadyStarted",
            TournamentError::NotInProgress => "NotInProgress",
            TournamentError::PlayerNotFound(_) => "PlayerNotFound",
            TournamentError::RosterLocked => "RosterLocked",
            TournamentError::InvalidSettings(_) => "InvalidSettings",
            TournamentError::Storage(_) => "Storage",
        }
    }

    /// Get a client-safe error message
    ///
    /// Storage errors are sanitized so file paths and serializer internals
    /// never reach a client.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Storage(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
