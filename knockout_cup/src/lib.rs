//! # Knockout Cup
//!
//! A two-legged knockout tournament engine for a fixed roster of players.
//!
//! The engine turns a list of confirmed players into a bracket, validates
//! and aggregates fixture scores, settles level ties with a penalty shootout
//! decided from outside, advances the bracket phase by phase and pays out
//! per-win bonuses plus a 70/30 final pot.
//!
//! ## Architecture
//!
//! The core is layered, leaves first:
//!
//! - **Roster**: players and their confirmation state
//! - **Bracket**: the one-time draw into the opening phase, with a single-leg
//!   preliminary round when the field is not a power of two
//! - **Fixture**: per-match leg sequencing, aggregates and penalties
//! - **Phase**: readiness and advancement towards the final
//! - **Standings**: rankings and the prize split
//!
//! [`Tournament`] ties them together as one explicitly owned aggregate and
//! [`TournamentManager`] serializes access to it for concurrent callers.
//!
//! ## Core Modules
//!
//! - [`tournament`]: The aggregate, its operations and the manager
//! - [`store`]: Snapshot persistence collaborators
//! - [`auth`]: Shared-secret check for start and reset
//!
//! ## Example
//!
//! ```
//! use knockout_cup::{AuthCode, DrawPolicy, Leg, Money, Roster, Tournament, TournamentSettings};
//!
//! let settings =
//!     TournamentSettings::new(Money::from_units(10), Money::from_units(2), DrawPolicy::Ordered);
//! let mut cup = Tournament::new(Roster::new(["Ana", "Bruno"]), settings);
//! cup.toggle_confirmation(1).unwrap();
//! cup.toggle_confirmation(2).unwrap();
//!
//! let auth = AuthCode::new("1234");
//! let final_id = cup.start(&auth, "1234").unwrap().matches()[0].id();
//! cup.register_score(final_id, Leg::First, 3, 1).unwrap();
//!
//! assert_eq!(cup.champion(), Some(1));
//! ```

pub mod auth;
pub mod bracket;
pub mod fixture;
pub mod money;
pub mod phase;
pub mod roster;
pub mod standings;
pub mod store;
pub mod tournament;

pub use auth::AuthCode;
pub use bracket::{BracketPlan, DrawPolicy};
pub use fixture::{Leg, MAX_GOALS_PER_LEG, Match, MatchFormat, MatchId, MatchState, Score};
pub use money::Money;
pub use phase::{Phase, PhaseState};
pub use roster::{Player, PlayerId, Roster};
pub use standings::{PlayerStanding, PrizeDistribution, Rankings};
pub use store::{JsonFileStore, MemoryStore, StoreError, TournamentStore};
pub use tournament::{
    NextMatch, Tournament, TournamentError, TournamentManager, TournamentOverview,
    TournamentResult, TournamentSettings, TournamentStatus,
};
