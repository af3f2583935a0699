//! Seeding order for the opening draw.

use crate::roster::PlayerId;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

/// How entrants are ordered before pairing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "seed", rename_all = "camelCase")]
pub enum DrawPolicy {
    /// Roster order, no shuffle
    Ordered,
    /// Shuffle with a fixed seed (reproducible)
    Seeded(u64),
    /// Shuffle with a fresh seed, recorded on the tournament
    #[default]
    Random,
}

impl DrawPolicy {
    /// Pick the seed for one draw
    ///
    /// `None` means no shuffle.
    pub fn resolve_seed(&self) -> Option<u64> {
        match self {
            DrawPolicy::Ordered => None,
            DrawPolicy::Seeded(seed) => Some(*seed),
            DrawPolicy::Random => Some(rand::random()),
        }
    }
}

/// Shuffler for the bracket draw
pub struct BracketDraw {
    rng: Option<StdRng>,
}

impl BracketDraw {
    /// Create a draw from a resolved seed; `None` keeps input order
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map(StdRng::seed_from_u64),
        }
    }

    pub fn ordered() -> Self {
        Self::from_seed(None)
    }

    /// Put entrants into draw order
    pub fn shuffle(&mut self, players: &mut [PlayerId]) {
        if let Some(rng) = self.rng.as_mut() {
            players.shuffle(rng);
        }
    }
}
