//! Bracket builder: seeds the confirmed roster into the opening phase.
//!
//! The builder runs once, when the tournament starts. A roster whose size is a
//! power of two is paired straight into phase 1; any other size first plays a
//! single-leg preliminary round (phase 0) that cuts the field down to the
//! largest power of two below it.

pub mod builder;
pub mod draw;

pub use builder::{
    BracketPlan, MIN_PLAYERS, build_opening, largest_power_of_two, pair_into_phase,
};
pub use draw::{BracketDraw, DrawPolicy};
