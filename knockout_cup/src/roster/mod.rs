//! Roster store: the fixed list of players and their confirmation state.
//!
//! Players are created once at roster setup and never deleted while a
//! tournament runs. The confirmation flag is the only field a player can change
//! directly; the cumulative wins, goals and earnings are written by the fixture
//! settlement and the final payout.

pub mod models;

pub use models::{Player, PlayerId, Roster};
