//! Standings and payouts: rankings and prize money derived from results.
//!
//! Rankings are recomputed on demand from the running per-player totals.
//! The prize split is computed once, when the final is decided.

pub mod payouts;
pub mod rankings;

pub use payouts::{CHAMPION_SHARE_PERCENT, PrizeDistribution};
pub use rankings::{PlayerStanding, Rankings, top_scorer};
