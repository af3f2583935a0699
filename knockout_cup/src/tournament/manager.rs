//! Tournament manager serializing access to the shared tournament.

use super::{
    errors::TournamentResult,
    models::{NextMatch, TournamentOverview, TournamentSettings},
    state::Tournament,
};
use crate::{
    auth::AuthCode,
    fixture::{Leg, Match, MatchId},
    phase::Phase,
    roster::{Player, PlayerId, Roster},
    standings::Rankings,
    store::{MemoryStore, TournamentStore},
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Tournament manager
///
/// Every mutation holds the write lock for its whole run: it is applied to a
/// copy of the state, the copy is saved, and only then does it replace the
/// shared state. A rejected operation or a failed save leaves the tournament
/// as it was. Reads return owned snapshots and never see a half-applied
/// change.
#[derive(Clone)]
pub struct TournamentManager {
    state: Arc<RwLock<Tournament>>,
    store: Arc<dyn TournamentStore>,
    auth: Arc<AuthCode>,
}

impl TournamentManager {
    /// Create a manager over an existing tournament
    pub fn new(tournament: Tournament, store: Arc<dyn TournamentStore>, auth: AuthCode) -> Self {
        Self {
            state: Arc::new(RwLock::new(tournament)),
            store,
            auth: Arc::new(auth),
        }
    }

    /// Create a manager backed by a [`MemoryStore`]
    pub fn in_memory(roster: Roster, settings: TournamentSettings, auth: AuthCode) -> Self {
        Self::new(
            Tournament::new(roster, settings),
            Arc::new(MemoryStore::new()),
            auth,
        )
    }

    /// Open a manager, restoring the saved snapshot when the store has one
    ///
    /// A restored snapshot wins over `roster` and `settings`.
    ///
    /// # Errors
    ///
    /// * `InvalidSettings` - `settings` fail validation
    /// * `Storage` - The store could not be read or written
    pub async fn open(
        store: Arc<dyn TournamentStore>,
        auth: AuthCode,
        roster: Roster,
        settings: TournamentSettings,
    ) -> TournamentResult<Self> {
        settings.validate()?;

        let tournament = match store.load().await? {
            Some(saved) => {
                log::info!(
                    "Restored tournament snapshot ({:?}, {} players, {} phases)",
                    saved.status(),
                    saved.players().len(),
                    saved.phases().len()
                );
                saved
            }
            None => {
                let fresh = Tournament::new(roster, settings);
                store.save(&fresh).await?;
                log::info!("Created new tournament with {} players", fresh.players().len());
                fresh
            }
        };

        Ok(Self::new(tournament, store, auth))
    }

    /// Copy of the whole tournament state
    pub async fn snapshot(&self) -> Tournament {
        self.state.read().await.clone()
    }

    pub async fn players(&self) -> Vec<Player> {
        self.state.read().await.players().to_vec()
    }

    /// Roster with live totals; names and ids never change
    pub async fn roster(&self) -> Roster {
        self.state.read().await.roster().clone()
    }

    pub async fn overview(&self) -> TournamentOverview {
        self.state.read().await.overview()
    }

    pub async fn current_phase(&self) -> Option<Phase> {
        self.state.read().await.current_phase().cloned()
    }

    pub async fn phases(&self) -> Vec<Phase> {
        self.state.read().await.phases().to_vec()
    }

    pub async fn next_matches(&self) -> Vec<NextMatch> {
        self.state.read().await.next_matches()
    }

    pub async fn rankings(&self) -> Rankings {
        self.state.read().await.rankings()
    }

    /// Flip a player's confirmation
    pub async fn toggle_confirmation(&self, id: PlayerId) -> TournamentResult<Player> {
        self.mutate(|t| t.toggle_confirmation(id).cloned()).await
    }

    /// Draw the bracket
    ///
    /// Returns the state the start produced, so the opening phase, the draw
    /// seed and the player names all come from the same write.
    pub async fn start(&self, code: &str) -> TournamentResult<Tournament> {
        let auth = Arc::clone(&self.auth);
        self.mutate(|t| {
            t.start(&auth, code)?;
            Ok(t.clone())
        })
        .await
    }

    pub async fn register_score(
        &self,
        match_id: MatchId,
        leg: Leg,
        goals_p1: i64,
        goals_p2: i64,
    ) -> TournamentResult<Match> {
        self.mutate(|t| t.register_score(match_id, leg, goals_p1, goals_p2).cloned())
            .await
    }

    pub async fn set_penalty_winner(
        &self,
        match_id: MatchId,
        winner: PlayerId,
    ) -> TournamentResult<Match> {
        self.mutate(|t| t.set_penalty_winner(match_id, winner).cloned())
            .await
    }

    /// Spawn the next phase; returns it
    pub async fn advance_phase(&self) -> TournamentResult<Phase> {
        self.mutate(|t| t.advance_phase().cloned()).await
    }

    pub async fn reset(&self, code: &str) -> TournamentResult<()> {
        let auth = Arc::clone(&self.auth);
        self.mutate(|t| t.reset(&auth, code)).await
    }

    async fn mutate<T, F>(&self, op: F) -> TournamentResult<T>
    where
        F: FnOnce(&mut Tournament) -> TournamentResult<T>,
    {
        let mut guard = self.state.write().await;

        let mut next = guard.clone();
        let value = op(&mut next)?;

        self.store.save(&next).await?;
        *guard = next;

        Ok(value)
    }
}
