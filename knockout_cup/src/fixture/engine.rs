//! Match state transitions: recording legs and settling shootouts.

use super::models::{Leg, Match, MatchFormat, MatchState, Score};
use crate::{
    roster::PlayerId,
    tournament::{TournamentError, TournamentResult},
};

/// What a recorded leg did to its match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegOutcome {
    /// More legs are needed
    AwaitingLeg(Leg),
    /// Level after every leg; a shootout winner must be supplied
    PendingPenalty,
    Decided { winner: PlayerId, loser: PlayerId },
}

/// Most goals one side may score in a single leg
pub const MAX_GOALS_PER_LEG: u32 = 999;

/// Validate raw goal counts coming from a caller
///
/// # Errors
///
/// Returns `InvalidScore` if either count is negative or above
/// [`MAX_GOALS_PER_LEG`]
pub fn parse_score(goals_p1: i64, goals_p2: i64) -> TournamentResult<Score> {
    let invalid = || TournamentError::InvalidScore {
        player1: goals_p1,
        player2: goals_p2,
    };

    let in_range = |goals: i64| {
        u32::try_from(goals)
            .ok()
            .filter(|goals| *goals <= MAX_GOALS_PER_LEG)
    };
    let player1 = in_range(goals_p1).ok_or_else(invalid)?;
    let player2 = in_range(goals_p2).ok_or_else(invalid)?;

    Ok(Score::new(player1, player2))
}

impl Match {
    /// Check that `leg` is the next leg this match accepts
    pub fn check_leg(&self, leg: Leg) -> TournamentResult<()> {
        if self.is_decided() {
            return Err(TournamentError::MatchAlreadyDecided(self.id));
        }

        match self.next_leg() {
            Some(expected) if expected == leg => Ok(()),
            _ => Err(TournamentError::LegOutOfOrder {
                match_id: self.id,
                leg,
            }),
        }
    }

    /// Record the score of one leg
    ///
    /// Once every leg is in, the side with the higher aggregate wins; a level
    /// aggregate moves the match to `PendingPenalty`.
    ///
    /// # Errors
    ///
    /// * `MatchAlreadyDecided` - The match already has a winner
    /// * `LegOutOfOrder` - `leg` is not the next expected leg
    /// * `InvalidScore` - A side scored more than [`MAX_GOALS_PER_LEG`]
    pub fn record_leg(&mut self, leg: Leg, score: Score) -> TournamentResult<LegOutcome> {
        self.check_leg(leg)?;
        if score.player1 > MAX_GOALS_PER_LEG || score.player2 > MAX_GOALS_PER_LEG {
            return Err(TournamentError::InvalidScore {
                player1: i64::from(score.player1),
                player2: i64::from(score.player2),
            });
        }

        match leg {
            Leg::First => self.first_leg = Some(score),
            Leg::Second => self.second_leg = Some(score),
        }

        if let Some(next) = self.next_leg() {
            return Ok(LegOutcome::AwaitingLeg(next));
        }

        let aggregate = self.aggregate();
        let winner = if aggregate.player1 > aggregate.player2 {
            self.player1
        } else if aggregate.player2 > aggregate.player1 {
            self.player2
        } else {
            self.state = MatchState::PendingPenalty;
            return Ok(LegOutcome::PendingPenalty);
        };

        self.state = MatchState::Decided {
            winner,
            by_penalties: false,
        };

        Ok(LegOutcome::Decided {
            winner,
            loser: self.loser_against(winner),
        })
    }

    /// Settle a level match with the shootout winner
    ///
    /// Shootout goals are never recorded; the aggregate stays level.
    ///
    /// # Returns
    ///
    /// * `PlayerId` - The eliminated player
    ///
    /// # Errors
    ///
    /// * `NotPendingPenalties` - The match is not level after all legs
    /// * `InvalidWinner` - `winner` is not one of the two participants
    pub fn resolve_penalties(&mut self, winner: PlayerId) -> TournamentResult<PlayerId> {
        if !self.is_pending_penalty() {
            return Err(TournamentError::NotPendingPenalties(self.id));
        }

        if !self.involves(winner) {
            return Err(TournamentError::InvalidWinner {
                match_id: self.id,
                player_id: winner,
            });
        }

        self.state = MatchState::Decided {
            winner,
            by_penalties: true,
        };

        Ok(self.loser_against(winner))
    }

    fn loser_against(&self, winner: PlayerId) -> PlayerId {
        if winner == self.player1 {
            self.player2
        } else {
            self.player1
        }
    }

    /// Whether this match is played over a single leg
    pub fn is_single_leg(&self) -> bool {
        self.format == MatchFormat::SingleLeg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_legged() -> Match {
        Match::new(7, 1, 1, 2, MatchFormat::TwoLegged, false)
    }

    fn single_leg() -> Match {
        Match::new(8, 2, 1, 2, MatchFormat::SingleLeg, true)
    }

    #[test]
    fn test_parse_score_rejects_negative() {
        assert_eq!(parse_score(2, 0).unwrap(), Score::new(2, 0));
        assert!(matches!(
            parse_score(-1, 0),
            Err(TournamentError::InvalidScore {
                player1: -1,
                player2: 0
            })
        ));
        assert!(matches!(
            parse_score(0, i64::from(u32::MAX) + 1),
            Err(TournamentError::InvalidScore { .. })
        ));
    }

    #[test]
    fn test_parse_score_caps_goals_per_leg() {
        let cap = i64::from(MAX_GOALS_PER_LEG);
        assert_eq!(
            parse_score(cap, 0).unwrap(),
            Score::new(MAX_GOALS_PER_LEG, 0)
        );
        assert!(matches!(
            parse_score(cap + 1, 0),
            Err(TournamentError::InvalidScore { .. })
        ));
        assert!(matches!(
            parse_score(i64::from(u32::MAX), 0),
            Err(TournamentError::InvalidScore { .. })
        ));
    }

    #[test]
    fn test_oversized_leg_leaves_match_untouched() {
        let mut m = two_legged();
        m.record_leg(Leg::First, Score::new(MAX_GOALS_PER_LEG, 0))
            .unwrap();

        let err = m
            .record_leg(Leg::Second, Score::new(u32::MAX, 0))
            .unwrap_err();
        assert!(matches!(err, TournamentError::InvalidScore { .. }));
        assert_eq!(m.next_leg(), Some(Leg::Second));
        assert_eq!(m.aggregate(), Score::new(MAX_GOALS_PER_LEG, 0));

        let outcome = m
            .record_leg(Leg::Second, Score::new(0, MAX_GOALS_PER_LEG))
            .unwrap();
        assert_eq!(outcome, LegOutcome::PendingPenalty);
        assert_eq!(m.aggregate(), Score::new(MAX_GOALS_PER_LEG, MAX_GOALS_PER_LEG));
    }

    #[test]
    fn test_score_sum_saturates() {
        let sum = Score::new(u32::MAX, 1) + Score::new(1, 1);
        assert_eq!(sum, Score::new(u32::MAX, 2));
    }

    #[test]
    fn test_aggregate_decides_two_legged_match() {
        let mut m = two_legged();

        let outcome = m.record_leg(Leg::First, Score::new(2, 0)).unwrap();
        assert_eq!(outcome, LegOutcome::AwaitingLeg(Leg::Second));
        assert!(m.winner().is_none());

        let outcome = m.record_leg(Leg::Second, Score::new(1, 1)).unwrap();
        assert_eq!(outcome, LegOutcome::Decided { winner: 1, loser: 2 });
        assert_eq!(m.aggregate(), Score::new(3, 1));
        assert_eq!(m.winner(), Some(1));
        assert!(!m.decided_by_penalties());
    }

    #[test]
    fn test_away_side_can_overturn_first_leg() {
        let mut m = two_legged();
        m.record_leg(Leg::First, Score::new(1, 0)).unwrap();
        let outcome = m.record_leg(Leg::Second, Score::new(0, 3)).unwrap();
        assert_eq!(outcome, LegOutcome::Decided { winner: 2, loser: 1 });
    }

    #[test]
    fn test_level_aggregate_waits_for_penalties() {
        let mut m = two_legged();
        m.record_leg(Leg::First, Score::new(2, 1)).unwrap();
        let outcome = m.record_leg(Leg::Second, Score::new(0, 1)).unwrap();

        assert_eq!(outcome, LegOutcome::PendingPenalty);
        assert!(m.is_pending_penalty());
        assert!(m.winner().is_none());
        assert!(!m.decided_by_penalties());
        assert_eq!(m.next_leg(), None);
    }

    #[test]
    fn test_second_leg_before_first_is_rejected() {
        let mut m = two_legged();
        let err = m.record_leg(Leg::Second, Score::new(1, 0)).unwrap_err();
        assert!(matches!(err, TournamentError::LegOutOfOrder { match_id: 7, .. }));
        assert!(!m.first_leg_completed());
        assert!(!m.second_leg_completed());
    }

    #[test]
    fn test_resubmitted_leg_is_rejected() {
        let mut m = two_legged();
        m.record_leg(Leg::First, Score::new(1, 0)).unwrap();
        let err = m.record_leg(Leg::First, Score::new(5, 5)).unwrap_err();
        assert!(matches!(err, TournamentError::LegOutOfOrder { .. }));
        assert_eq!(m.first_leg(), Some(Score::new(1, 0)));
    }

    #[test]
    fn test_single_leg_match_only_accepts_first() {
        let mut m = single_leg();
        let err = m.record_leg(Leg::Second, Score::new(1, 0)).unwrap_err();
        assert!(matches!(err, TournamentError::LegOutOfOrder { .. }));

        let outcome = m.record_leg(Leg::First, Score::new(0, 2)).unwrap();
        assert_eq!(outcome, LegOutcome::Decided { winner: 2, loser: 1 });
    }

    #[test]
    fn test_single_leg_draw_goes_to_penalties() {
        let mut m = single_leg();
        assert_eq!(
            m.record_leg(Leg::First, Score::new(1, 1)).unwrap(),
            LegOutcome::PendingPenalty
        );
    }

    #[test]
    fn test_decided_match_is_frozen() {
        let mut m = single_leg();
        m.record_leg(Leg::First, Score::new(3, 0)).unwrap();

        let err = m.record_leg(Leg::First, Score::new(0, 0)).unwrap_err();
        assert!(matches!(err, TournamentError::MatchAlreadyDecided(8)));

        let err = m.resolve_penalties(1).unwrap_err();
        assert!(matches!(err, TournamentError::NotPendingPenalties(8)));
    }

    #[test]
    fn test_resolve_penalties() {
        let mut m = two_legged();
        m.record_leg(Leg::First, Score::new(1, 1)).unwrap();
        m.record_leg(Leg::Second, Score::new(1, 1)).unwrap();

        let err = m.resolve_penalties(99).unwrap_err();
        assert!(matches!(
            err,
            TournamentError::InvalidWinner {
                match_id: 7,
                player_id: 99
            }
        ));
        assert!(m.is_pending_penalty());

        let loser = m.resolve_penalties(2).unwrap();
        assert_eq!(loser, 1);
        assert_eq!(m.winner(), Some(2));
        assert!(m.decided_by_penalties());
        // Shootout goals never reach the aggregate
        assert_eq!(m.aggregate(), Score::new(2, 2));
    }

    #[test]
    fn test_penalties_rejected_while_legs_outstanding() {
        let mut m = two_legged();
        m.record_leg(Leg::First, Score::new(0, 0)).unwrap();
        assert!(matches!(
            m.resolve_penalties(1),
            Err(TournamentError::NotPendingPenalties(7))
        ));
    }
}
