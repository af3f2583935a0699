//! Match data models.

use crate::roster::PlayerId;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Add};

/// Match ID type
pub type MatchId = i64;

/// One of the (up to) two fixtures of a tie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    /// First leg ("ida")
    #[serde(alias = "ida")]
    First,
    /// Second leg ("volta")
    #[serde(alias = "volta")]
    Second,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::First => write!(f, "first"),
            Leg::Second => write!(f, "second"),
        }
    }
}

/// Goals scored by each side in one leg (or summed over legs)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub const fn new(player1: u32, player2: u32) -> Self {
        Self { player1, player2 }
    }

    pub const fn is_level(&self) -> bool {
        self.player1 == self.player2
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score {
            player1: self.player1.saturating_add(rhs.player1),
            player2: self.player2.saturating_add(rhs.player2),
        }
    }
}

/// How many legs a match is played over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchFormat {
    /// Preliminary round and final
    SingleLeg,
    /// Home and away
    TwoLegged,
}

/// Where a match stands in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchState {
    Undecided,
    /// All legs played, aggregate level, waiting for the shootout result
    PendingPenalty,
    #[serde(rename_all = "camelCase")]
    Decided {
        winner: PlayerId,
        by_penalties: bool,
    },
}

/// A fixture between two players
///
/// Fields are private: a match only changes through
/// [`Match::record_leg`](crate::fixture::Match::record_leg) and
/// [`Match::resolve_penalties`](crate::fixture::Match::resolve_penalties),
/// and is frozen once decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub(super) id: MatchId,
    pub(super) phase: u32,
    pub(super) player1: PlayerId,
    pub(super) player2: PlayerId,
    pub(super) format: MatchFormat,
    pub(super) is_final: bool,
    pub(super) first_leg: Option<Score>,
    pub(super) second_leg: Option<Score>,
    pub(super) state: MatchState,
}

impl Match {
    /// Create an unplayed match
    pub fn new(
        id: MatchId,
        phase: u32,
        player1: PlayerId,
        player2: PlayerId,
        format: MatchFormat,
        is_final: bool,
    ) -> Self {
        Self {
            id,
            phase,
            player1,
            player2,
            format,
            is_final,
            first_leg: None,
            second_leg: None,
            state: MatchState::Undecided,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Number of the phase this match belongs to
    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn player1(&self) -> PlayerId {
        self.player1
    }

    pub fn player2(&self) -> PlayerId {
        self.player2
    }

    pub fn format(&self) -> MatchFormat {
        self.format
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn first_leg(&self) -> Option<Score> {
        self.first_leg
    }

    pub fn second_leg(&self) -> Option<Score> {
        self.second_leg
    }

    pub fn first_leg_completed(&self) -> bool {
        self.first_leg.is_some()
    }

    pub fn second_leg_completed(&self) -> bool {
        self.second_leg.is_some()
    }

    /// Whether every leg this match needs has been played
    pub fn legs_completed(&self) -> bool {
        match self.format {
            MatchFormat::SingleLeg => self.first_leg_completed(),
            MatchFormat::TwoLegged => self.first_leg_completed() && self.second_leg_completed(),
        }
    }

    /// Goals per side summed over the legs played so far
    pub fn aggregate(&self) -> Score {
        self.first_leg.unwrap_or_default() + self.second_leg.unwrap_or_default()
    }

    /// The leg that must be recorded next, if any
    pub fn next_leg(&self) -> Option<Leg> {
        if self.is_decided() || self.legs_completed() {
            return None;
        }

        if self.first_leg_completed() {
            Some(Leg::Second)
        } else {
            Some(Leg::First)
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(self.state, MatchState::Decided { .. })
    }

    pub fn is_pending_penalty(&self) -> bool {
        self.state == MatchState::PendingPenalty
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.state {
            MatchState::Decided { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub fn loser(&self) -> Option<PlayerId> {
        self.winner().and_then(|winner| self.opponent_of(winner))
    }

    pub fn decided_by_penalties(&self) -> bool {
        matches!(
            self.state,
            MatchState::Decided {
                by_penalties: true,
                ..
            }
        )
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1 == player || self.player2 == player
    }

    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        if player == self.player1 {
            Some(self.player2)
        } else if player == self.player2 {
            Some(self.player1)
        } else {
            None
        }
    }

    /// Regulation goals scored by `player` across all legs played
    pub fn goals_for(&self, player: PlayerId) -> u32 {
        let aggregate = self.aggregate();
        if player == self.player1 {
            aggregate.player1
        } else if player == self.player2 {
            aggregate.player2
        } else {
            0
        }
    }
}
