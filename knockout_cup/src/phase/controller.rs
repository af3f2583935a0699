//! Advancing the bracket from one phase to the next.

use super::models::Phase;
use crate::{
    bracket::pair_into_phase,
    fixture::MatchId,
    roster::PlayerId,
    tournament::{TournamentError, TournamentResult},
};

/// Players going through from a finished phase, in draw order for the next one
///
/// Main phases keep bracket order: winners in match order, then the bye.
/// Coming out of the preliminary round, play-in winners are interleaved with
/// the players who had a bye so that they meet a rested opponent.
///
/// # Errors
///
/// * `AlreadyFinal` - The phase is the final
/// * `PhaseNotReady` - Some match has no winner yet
pub fn qualified_pool(phase: &Phase) -> TournamentResult<Vec<PlayerId>> {
    if phase.is_final() {
        return Err(TournamentError::AlreadyFinal);
    }

    if !phase.is_ready() {
        return Err(TournamentError::PhaseNotReady {
            phase: phase.number(),
            pending: phase.pending_count(),
        });
    }

    let winners = phase.winners();
    if !phase.is_preliminary() {
        return Ok(winners.into_iter().chain(phase.byes().iter().copied()).collect());
    }

    let mut pool = Vec::with_capacity(winners.len() + phase.byes().len());
    let mut byes = phase.byes().iter().copied();
    let mut winners = winners.into_iter();
    loop {
        match (byes.next(), winners.next()) {
            (None, None) => break,
            (bye, winner) => pool.extend(bye.into_iter().chain(winner)),
        }
    }

    Ok(pool)
}

/// Spawn the phase that follows `current`
///
/// # Errors
///
/// * `AlreadyFinal` - `current` is the final
/// * `PhaseNotReady` - `current` still has undecided matches
pub fn next_phase(current: &Phase, next_match_id: &mut MatchId) -> TournamentResult<Phase> {
    let pool = qualified_pool(current)?;
    pair_into_phase(current.number() + 1, &pool, next_match_id)
}
