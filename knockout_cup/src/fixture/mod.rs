//! Match engine: per-fixture scoring, leg sequencing, aggregates and
//! penalty resolution.
//!
//! A [`Match`] moves through an explicit state machine:
//!
//! - **Undecided**: one or more legs still to be played
//! - **PendingPenalty**: every leg is in and the aggregate is level; a
//!   shootout winner must be supplied from outside
//! - **Decided**: a winner is recorded and the match is frozen
//!
//! Preliminary-round matches and the final are single-leg; every other round
//! is played home and away.

pub mod engine;
pub mod models;

pub use engine::{LegOutcome, MAX_GOALS_PER_LEG, parse_score};
pub use models::{Leg, Match, MatchFormat, MatchId, MatchState, Score};
