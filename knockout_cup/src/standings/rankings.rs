//! Rolling rankings by wins, goals and earnings.

use crate::{
    money::Money,
    roster::{Player, PlayerId},
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// One row of a ranking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStanding {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub goals: u32,
    pub earnings: Money,
}

impl From<&Player> for PlayerStanding {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            wins: player.wins,
            goals: player.goals,
            earnings: player.earnings,
        }
    }
}

/// The three ranking tables
///
/// Each table is sorted descending on its key. Equal keys keep the order the
/// players were given in (roster order), so output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub by_wins: Vec<PlayerStanding>,
    pub by_goals: Vec<PlayerStanding>,
    pub by_earnings: Vec<PlayerStanding>,
}

impl Rankings {
    pub fn compute<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let base: Vec<PlayerStanding> = players.into_iter().map(PlayerStanding::from).collect();

        // `sort_by_key` is stable
        let mut by_wins = base.clone();
        by_wins.sort_by_key(|s| Reverse(s.wins));

        let mut by_goals = base.clone();
        by_goals.sort_by_key(|s| Reverse(s.goals));

        let mut by_earnings = base;
        by_earnings.sort_by_key(|s| Reverse(s.earnings));

        Self {
            by_wins,
            by_goals,
            by_earnings,
        }
    }
}

/// Player with the most regulation goals; ties go to the first one given
pub fn top_scorer<'a>(players: impl IntoIterator<Item = &'a Player>) -> Option<&'a Player> {
    players.into_iter().fold(None, |best, player| match best {
        Some(current) if current.goals >= player.goals => Some(current),
        _ => Some(player),
    })
}
