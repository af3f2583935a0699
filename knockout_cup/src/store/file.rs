//! JSON snapshot file store.

use super::{StoreResult, TournamentStore};
use crate::tournament::Tournament;
use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Persists the tournament as a single JSON document
///
/// Writes go to a sibling temp file that is then renamed over the snapshot,
/// so a crash mid-write never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl TournamentStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Option<Tournament>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn save(&self, tournament: &Tournament) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(tournament)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        log::debug!("Saved tournament snapshot to {}", self.path.display());
        Ok(())
    }
}
