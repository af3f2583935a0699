//! Final pot split between champion and runner-up.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Champion's share of the remaining pool; the runner-up takes the rest
pub const CHAMPION_SHARE_PERCENT: i64 = 70;

/// How the prize pool was paid out
///
/// Per-win bonuses are paid as matches are decided. Whatever is left of the
/// pool when the final ends is split 70/30 between champion and runner-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeDistribution {
    /// Entry fee times confirmed players
    pub total_pool: Money,
    /// Per-win bonuses already credited
    pub bonuses_paid: Money,
    pub remaining_pool: Money,
    pub champion_prize: Money,
    pub runner_up_prize: Money,
}

impl PrizeDistribution {
    /// Create the distribution for a finished tournament
    ///
    /// The champion's share is rounded down to the cent and the runner-up
    /// receives the remainder, so the two prizes always add up to the
    /// remaining pool. A pool already exhausted by bonuses pays nothing more.
    pub fn compute(entry_fee: Money, confirmed_players: usize, bonuses_paid: Money) -> Self {
        let total_pool = entry_fee * confirmed_players as i64;
        let remaining_pool = (total_pool - bonuses_paid).max(Money::ZERO);
        let champion_prize = remaining_pool.percent(CHAMPION_SHARE_PERCENT);
        let runner_up_prize = remaining_pool - champion_prize;

        Self {
            total_pool,
            bonuses_paid,
            remaining_pool,
            champion_prize,
            runner_up_prize,
        }
    }

    /// Everything paid out, bonuses included
    pub fn paid_out(&self) -> Money {
        self.bonuses_paid + self.champion_prize + self.runner_up_prize
    }
}
