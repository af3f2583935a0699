//! In-process store.

use super::{StoreResult, TournamentStore};
use crate::tournament::Tournament;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps the last snapshot in memory; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<Option<Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a snapshot
    pub fn with_snapshot(tournament: Tournament) -> Self {
        Self {
            snapshot: RwLock::new(Some(tournament)),
        }
    }
}

#[async_trait]
impl TournamentStore for MemoryStore {
    async fn load(&self) -> StoreResult<Option<Tournament>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, tournament: &Tournament) -> StoreResult<()> {
        *self.snapshot.write().await = Some(tournament.clone());
        Ok(())
    }
}
