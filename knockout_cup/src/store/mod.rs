//! Storage collaborator for tournament snapshots.
//!
//! The engine keeps the authoritative state in memory and hands a full
//! snapshot to the store after every successful mutation. A store only needs
//! to load and save that snapshot; the storage technology is up to the
//! implementation.

use crate::tournament::Tournament;
use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for tournament snapshot persistence
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Load the last saved snapshot, if any
    async fn load(&self) -> StoreResult<Option<Tournament>>;

    /// Replace the saved snapshot
    async fn save(&self, tournament: &Tournament) -> StoreResult<()>;
}
