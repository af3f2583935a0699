//! Phase data models.

use crate::{
    fixture::{Leg, Match, MatchId},
    roster::PlayerId,
};
use serde::{Deserialize, Serialize};

/// Lifecycle of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseState {
    /// Some matches undecided
    Open,
    /// Every match decided; waiting for an advance
    Ready,
    /// Superseded by the next phase (kept for history)
    Advanced,
    /// The final has a winner
    Decided,
}

/// One round of the bracket
///
/// Phase 0 is the preliminary round when one is needed; phases 1..N are the
/// main bracket and the last one is flagged final. The list of matches never
/// changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    number: u32,
    is_final: bool,
    matches: Vec<Match>,
    byes: Vec<PlayerId>,
    advanced: bool,
}

impl Phase {
    pub fn new(number: u32, is_final: bool, matches: Vec<Match>, byes: Vec<PlayerId>) -> Self {
        Self {
            number,
            is_final,
            matches,
            byes,
            advanced: false,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Whether this is the play-in round
    pub fn is_preliminary(&self) -> bool {
        self.number == 0
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Players advancing from this phase without playing
    ///
    /// The preliminary round may hold several; a main phase holds at most one.
    pub fn byes(&self) -> &[PlayerId] {
        &self.byes
    }

    /// The single phase bye of a main-bracket phase
    pub fn bye_player(&self) -> Option<PlayerId> {
        match self.byes.as_slice() {
            [single] if !self.is_preliminary() => Some(*single),
            _ => None,
        }
    }

    /// True once every match has a winner; byes never block readiness
    pub fn is_ready(&self) -> bool {
        self.matches.iter().all(Match::is_decided)
    }

    pub fn state(&self) -> PhaseState {
        if self.advanced {
            PhaseState::Advanced
        } else if !self.is_ready() {
            PhaseState::Open
        } else if self.is_final {
            PhaseState::Decided
        } else {
            PhaseState::Ready
        }
    }

    /// Number of matches still without a winner
    pub fn pending_count(&self) -> usize {
        self.matches.iter().filter(|m| !m.is_decided()).count()
    }

    /// Winners in match order
    pub fn winners(&self) -> Vec<PlayerId> {
        self.matches.iter().filter_map(Match::winner).collect()
    }

    /// Matches with a leg still to play, paired with that leg
    pub fn next_matches(&self) -> impl Iterator<Item = (&Match, Leg)> {
        self.matches
            .iter()
            .filter_map(|m| m.next_leg().map(|leg| (m, leg)))
    }

    /// Matches level after every leg
    pub fn awaiting_penalties(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_pending_penalty())
    }

    /// Players in this phase, whether they play or not
    pub fn entrants(&self) -> usize {
        self.matches.len() * 2 + self.byes.len()
    }

    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id() == id)
    }

    pub(crate) fn find_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id() == id)
    }

    pub(crate) fn mark_advanced(&mut self) {
        self.advanced = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{MatchFormat, Score};

    fn phase_with_two_matches() -> Phase {
        Phase::new(
            1,
            false,
            vec![
                Match::new(1, 1, 1, 2, MatchFormat::SingleLeg, false),
                Match::new(2, 1, 3, 4, MatchFormat::SingleLeg, false),
            ],
            vec![5],
        )
    }

    #[test]
    fn test_readiness_follows_match_winners() {
        let mut phase = phase_with_two_matches();
        assert!(!phase.is_ready());
        assert_eq!(phase.state(), PhaseState::Open);
        assert_eq!(phase.pending_count(), 2);

        phase
            .find_match_mut(1)
            .unwrap()
            .record_leg(Leg::First, Score::new(1, 0))
            .unwrap();
        assert!(!phase.is_ready());

        phase
            .find_match_mut(2)
            .unwrap()
            .record_leg(Leg::First, Score::new(0, 4))
            .unwrap();
        assert!(phase.is_ready());
        assert_eq!(phase.state(), PhaseState::Ready);
        assert_eq!(phase.winners(), vec![1, 4]);
    }

    #[test]
    fn test_pending_penalty_blocks_readiness() {
        let mut phase = phase_with_two_matches();
        phase
            .find_match_mut(1)
            .unwrap()
            .record_leg(Leg::First, Score::new(2, 2))
            .unwrap();
        phase
            .find_match_mut(2)
            .unwrap()
            .record_leg(Leg::First, Score::new(1, 0))
            .unwrap();

        assert!(!phase.is_ready());
        assert_eq!(phase.awaiting_penalties().count(), 1);
        assert_eq!(phase.next_matches().count(), 0);
    }

    #[test]
    fn test_bye_player_and_entrants() {
        let phase = phase_with_two_matches();
        assert_eq!(phase.bye_player(), Some(5));
        assert_eq!(phase.entrants(), 5);

        let preliminary = Phase::new(0, false, Vec::new(), vec![1, 2, 3]);
        assert!(preliminary.is_preliminary());
        assert_eq!(preliminary.bye_player(), None);
    }

    #[test]
    fn test_advanced_and_decided_states() {
        let mut phase = phase_with_two_matches();
        phase.mark_advanced();
        assert_eq!(phase.state(), PhaseState::Advanced);

        let mut final_phase = Phase::new(
            2,
            true,
            vec![Match::new(3, 2, 1, 4, MatchFormat::SingleLeg, true)],
            Vec::new(),
        );
        assert_eq!(final_phase.state(), PhaseState::Open);
        final_phase
            .find_match_mut(3)
            .unwrap()
            .record_leg(Leg::First, Score::new(2, 0))
            .unwrap();
        assert_eq!(final_phase.state(), PhaseState::Decided);
    }
}
