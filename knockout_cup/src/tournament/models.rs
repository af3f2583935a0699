//! Tournament data models.

use super::errors::{TournamentError, TournamentResult};
use crate::{
    bracket::DrawPolicy,
    fixture::{Leg, Match},
    money::Money,
    standings::{PlayerStanding, PrizeDistribution},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tournament status
///
/// Moves forward only: pre-tournament -> in-progress -> finished. Reset is the
/// only way back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentStatus {
    /// Players confirming; no bracket yet
    #[default]
    PreTournament,
    /// Bracket drawn and being played
    InProgress,
    /// Final decided, prizes paid
    Finished,
}

/// Tournament configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettings {
    /// Paid by every confirmed player into the pool
    pub entry_fee: Money,
    /// Credited to the winner of each match before the final
    pub bonus_per_win: Money,
    /// Seeding policy for the opening draw
    pub draw: DrawPolicy,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            entry_fee: Money::from_units(10),
            bonus_per_win: Money::from_units(2),
            draw: DrawPolicy::Random,
        }
    }
}

impl TournamentSettings {
    /// Create settings with a fixed draw
    pub fn new(entry_fee: Money, bonus_per_win: Money, draw: DrawPolicy) -> Self {
        Self {
            entry_fee,
            bonus_per_win,
            draw,
        }
    }

    /// Validate settings
    ///
    /// A knockout of `N` players pays `N - 2` bonuses before the final, so a
    /// bonus no larger than the entry fee always leaves a non-negative pot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` describing the first problem found
    pub fn validate(&self) -> TournamentResult<()> {
        if self.entry_fee <= Money::ZERO {
            return Err(TournamentError::InvalidSettings(
                "entry fee must be positive".to_string(),
            ));
        }

        if self.bonus_per_win.is_negative() {
            return Err(TournamentError::InvalidSettings(
                "bonus per win cannot be negative".to_string(),
            ));
        }

        if self.bonus_per_win > self.entry_fee {
            return Err(TournamentError::InvalidSettings(format!(
                "bonus per win ({}) exceeds entry fee ({})",
                self.bonus_per_win, self.entry_fee
            )));
        }

        Ok(())
    }
}

/// A match with a leg still to play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMatch {
    pub fixture: Match,
    pub next_leg: Leg,
}

/// Tournament summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentOverview {
    pub status: TournamentStatus,
    pub entry_fee: Money,
    pub bonus_per_win: Money,
    /// Entry fee times confirmed players (live before the start)
    pub total_prize: Money,
    pub confirmed_count: usize,
    /// Number of the phase being played
    pub current_phase: Option<u32>,
    pub phase_count: usize,
    pub champion: Option<PlayerStanding>,
    pub runner_up: Option<PlayerStanding>,
    pub top_scorer: Option<PlayerStanding>,
    /// Regulation goals scored in decided matches
    pub total_goals: u32,
    pub prize: Option<PrizeDistribution>,
    /// Seed used for the opening draw, `None` for an ordered draw
    pub draw_seed: Option<u64>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
