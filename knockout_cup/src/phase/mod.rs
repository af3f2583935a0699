//! Phase controller: readiness, advancement and the end of the bracket.
//!
//! A non-final phase moves `Open` -> `Ready` -> `Advanced`; the final moves
//! `Open` -> `Decided`, which finishes the tournament.

pub mod controller;
pub mod models;

pub use controller::{next_phase, qualified_pool};
pub use models::{Phase, PhaseState};
