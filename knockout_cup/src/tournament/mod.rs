//! Tournament aggregate and the single-writer manager that owns it.
//!
//! This module provides:
//! - The [`Tournament`] aggregate: roster, bracket phases, results and prizes
//! - Operations to start, score, settle penalties, advance and reset
//! - [`TournamentManager`], which serializes mutations and persists every
//!   successful one through a [`TournamentStore`](crate::store::TournamentStore)
//!
//! ## Example
//!
//! ```no_run
//! use knockout_cup::{
//!     AuthCode, DrawPolicy, Leg, Money, Roster, TournamentManager, TournamentSettings,
//! };
//! use knockout_cup::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = TournamentSettings::new(
//!         Money::from_units(10),
//!         Money::from_units(2),
//!         DrawPolicy::Ordered,
//!     );
//!     let manager = TournamentManager::open(
//!         Arc::new(MemoryStore::new()),
//!         AuthCode::new("1234"),
//!         Roster::new(["Ana", "Bruno"]),
//!         settings,
//!     )
//!     .await?;
//!
//!     manager.toggle_confirmation(1).await?;
//!     manager.toggle_confirmation(2).await?;
//!     let started = manager.start("1234").await?;
//!
//!     let id = started.phases()[0].matches()[0].id();
//!     manager.register_score(id, Leg::First, 2, 1).await?;
//!     println!("{:?}", manager.overview().await.champion);
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod state;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{NextMatch, TournamentOverview, TournamentSettings, TournamentStatus};
pub use state::Tournament;
