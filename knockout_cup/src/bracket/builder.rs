//! Turning a confirmed roster into the opening phase.

use super::draw::BracketDraw;
use crate::{
    fixture::{Match, MatchFormat, MatchId},
    phase::Phase,
    roster::PlayerId,
    tournament::{TournamentError, TournamentResult},
};
use serde::Serialize;

/// Minimum confirmed players for a tournament
pub const MIN_PLAYERS: usize = 2;

/// Largest power of two that is `<= n` (`n >= 1`)
pub fn largest_power_of_two(n: usize) -> usize {
    debug_assert!(n > 0, "no power of two fits in zero");
    1 << (usize::BITS - 1 - n.leading_zeros())
}

/// Shape of the bracket for a given number of entrants
///
/// When the entrant count `N` is not a power of two, the excess over the
/// largest power of two `P` is removed by a single-leg play-in round:
/// `N - P` matches among `2 * (N - P)` players while `2P - N` players get a
/// preliminary bye. The main bracket then starts with exactly `P` players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketPlan {
    pub entrants: usize,
    /// Players in the first main-bracket phase
    pub main_field: usize,
    pub preliminary_matches: usize,
    pub preliminary_byes: usize,
}

impl BracketPlan {
    /// Plan the bracket for `entrants` players
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPlayers` for fewer than two entrants
    pub fn for_entrants(entrants: usize) -> TournamentResult<Self> {
        if entrants < MIN_PLAYERS {
            return Err(TournamentError::InsufficientPlayers {
                needed: MIN_PLAYERS,
                current: entrants,
            });
        }

        let main_field = largest_power_of_two(entrants);
        let preliminary_matches = entrants - main_field;
        let preliminary_byes = entrants - 2 * preliminary_matches;

        Ok(Self {
            entrants,
            main_field,
            preliminary_matches,
            preliminary_byes,
        })
    }

    pub fn needs_preliminary(&self) -> bool {
        self.preliminary_matches > 0
    }

    /// Players drawn into play-in matches
    pub fn play_in_players(&self) -> usize {
        self.preliminary_matches * 2
    }

    /// Main-bracket phases, final included
    pub fn main_rounds(&self) -> u32 {
        self.main_field.trailing_zeros()
    }
}

/// Pair a pool of players into a main-bracket phase
///
/// A pool of two becomes the single-leg final. Larger pools are paired in
/// order into two-legged ties; an odd pool leaves its last player with the
/// phase bye.
///
/// # Errors
///
/// Returns `AlreadyFinal` for a pool with fewer than two players, which can
/// only mean the bracket already has its champion.
pub fn pair_into_phase(
    number: u32,
    pool: &[PlayerId],
    next_match_id: &mut MatchId,
) -> TournamentResult<Phase> {
    if pool.len() < MIN_PLAYERS {
        return Err(TournamentError::AlreadyFinal);
    }

    let is_final = pool.len() == 2;
    let format = if is_final {
        MatchFormat::SingleLeg
    } else {
        MatchFormat::TwoLegged
    };

    let (paired, byes) = pool.split_at(pool.len() - pool.len() % 2);
    let matches = paired
        .chunks_exact(2)
        .map(|pair| {
            let id = *next_match_id;
            *next_match_id += 1;
            Match::new(id, number, pair[0], pair[1], format, is_final)
        })
        .collect();

    Ok(Phase::new(number, is_final, matches, byes.to_vec()))
}

/// Build the first phase of a tournament
///
/// Returns the preliminary round (phase 0) when the entrant count is not a
/// power of two, otherwise phase 1 of the main bracket.
///
/// # Errors
///
/// Returns `InsufficientPlayers` for fewer than two entrants
pub fn build_opening(
    entrants: &[PlayerId],
    draw: &mut BracketDraw,
    next_match_id: &mut MatchId,
) -> TournamentResult<Phase> {
    let plan = BracketPlan::for_entrants(entrants.len())?;
    log::debug!(
        "Bracket for {} entrants: {} play-in match(es), {} main round(s)",
        entrants.len(),
        plan.preliminary_matches,
        plan.main_rounds()
    );

    let mut order = entrants.to_vec();
    draw.shuffle(&mut order);

    if !plan.needs_preliminary() {
        return pair_into_phase(1, &order, next_match_id);
    }

    let (play_in, byes) = order.split_at(plan.play_in_players());
    let matches = play_in
        .chunks_exact(2)
        .map(|pair| {
            let id = *next_match_id;
            *next_match_id += 1;
            Match::new(id, 0, pair[0], pair[1], MatchFormat::SingleLeg, false)
        })
        .collect();

    Ok(Phase::new(0, false, matches, byes.to_vec()))
}
