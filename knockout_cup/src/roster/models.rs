//! Player and roster data models.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Player ID type
pub type PlayerId = i64;

/// A rostered player and their running tournament totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Player ID (1-indexed, roster order)
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Whether the player has signed up for the tournament
    pub confirmed: bool,
    /// Matches won
    pub wins: u32,
    /// Goals scored in regulation (penalty shootouts excluded)
    pub goals: u32,
    /// Bonuses plus final prize money
    pub earnings: Money,
}

impl Player {
    /// Create an unconfirmed player with zeroed totals
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            confirmed: false,
            wins: 0,
            goals: 0,
            earnings: Money::ZERO,
        }
    }

    /// Wipe confirmation and every cumulative field
    pub fn reset(&mut self) {
        self.confirmed = false;
        self.wins = 0;
        self.goals = 0;
        self.earnings = Money::ZERO;
    }
}

/// The fixed, ordered list of players
///
/// Roster order is significant: it is the tie-break for every ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from display names, assigning IDs in order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Player::new(idx as PlayerId + 1, name))
            .collect();

        Self { players }
    }

    /// All players in roster order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Flip a player's confirmation flag
    ///
    /// # Returns
    ///
    /// * `Option<&Player>` - The updated player, or `None` if the ID is unknown
    pub fn toggle_confirmation(&mut self, id: PlayerId) -> Option<&Player> {
        let player = self.get_mut(id)?;
        player.confirmed = !player.confirmed;
        Some(player)
    }

    /// Confirmed players in roster order
    pub fn confirmed(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.confirmed)
    }

    pub fn confirmed_ids(&self) -> Vec<PlayerId> {
        self.confirmed().map(|p| p.id).collect()
    }

    pub fn confirmed_count(&self) -> usize {
        self.confirmed().count()
    }

    /// Reset every player to the pre-tournament state
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
