//! The tournament aggregate and its operations.

use super::{
    errors::{TournamentError, TournamentResult},
    models::{NextMatch, TournamentOverview, TournamentSettings, TournamentStatus},
};
use crate::{
    auth::AuthCode,
    bracket::{BracketDraw, build_opening},
    fixture::{Leg, LegOutcome, Match, MatchId, parse_score},
    money::Money,
    phase::{Phase, next_phase},
    roster::{Player, PlayerId, Roster},
    standings::{PlayerStanding, PrizeDistribution, Rankings, top_scorer},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single knockout tournament over a fixed roster
///
/// Every operation checks all of its preconditions before it changes
/// anything, so a failed call leaves the tournament untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    settings: TournamentSettings,
    roster: Roster,
    status: TournamentStatus,
    /// Every phase played so far; the last one is current
    phases: Vec<Phase>,
    champion: Option<PlayerId>,
    runner_up: Option<PlayerId>,
    top_scorer: Option<PlayerId>,
    prize: Option<PrizeDistribution>,
    draw_seed: Option<u64>,
    next_match_id: MatchId,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a pre-tournament state for `roster`
    pub fn new(roster: Roster, settings: TournamentSettings) -> Self {
        Self {
            settings,
            roster,
            status: TournamentStatus::PreTournament,
            phases: Vec::new(),
            champion: None,
            runner_up: None,
            top_scorer: None,
            prize: None,
            draw_seed: None,
            next_match_id: 1,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.phases.last()
    }

    pub fn champion(&self) -> Option<PlayerId> {
        self.champion
    }

    pub fn runner_up(&self) -> Option<PlayerId> {
        self.runner_up
    }

    pub fn top_scorer(&self) -> Option<PlayerId> {
        self.top_scorer
    }

    pub fn prize(&self) -> Option<&PrizeDistribution> {
        self.prize.as_ref()
    }

    pub fn draw_seed(&self) -> Option<u64> {
        self.draw_seed
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Entry fee times confirmed players
    pub fn total_prize(&self) -> Money {
        self.settings.entry_fee * self.roster.confirmed_count() as i64
    }

    /// Look up a match in any phase
    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.phases.iter().find_map(|phase| phase.find_match(id))
    }

    /// Flip a player's confirmation
    ///
    /// # Errors
    ///
    /// * `RosterLocked` - The tournament has started
    /// * `PlayerNotFound` - No player with this ID
    pub fn toggle_confirmation(&mut self, id: PlayerId) -> TournamentResult<&Player> {
        if self.status != TournamentStatus::PreTournament {
            return Err(TournamentError::RosterLocked);
        }

        self.roster
            .toggle_confirmation(id)
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    /// Draw the bracket and start play
    ///
    /// The opening phase is the preliminary round when the confirmed count
    /// is not a power of two; its `byes()` are the players who go straight
    /// through.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - Wrong authorization code (checked first)
    /// * `AlreadyStarted` - Not in pre-tournament
    /// * `InvalidSettings` - Settings fail validation
    /// * `InsufficientPlayers` - Fewer than two confirmed players
    pub fn start(&mut self, auth: &AuthCode, code: &str) -> TournamentResult<&Phase> {
        authorize(auth, code, "start")?;

        if self.status != TournamentStatus::PreTournament {
            return Err(TournamentError::AlreadyStarted);
        }
        self.settings.validate()?;

        let entrants = self.roster.confirmed_ids();
        let seed = self.settings.draw.resolve_seed();
        let mut next_match_id = self.next_match_id;
        let opening = build_opening(&entrants, &mut BracketDraw::from_seed(seed), &mut next_match_id)?;

        log::info!(
            "Tournament started: {} players, opening phase {} with {} match(es), {} bye(s)",
            entrants.len(),
            opening.number(),
            opening.matches().len(),
            opening.byes().len()
        );

        self.phases = vec![opening];
        self.next_match_id = next_match_id;
        self.draw_seed = seed;
        self.status = TournamentStatus::InProgress;
        self.started_at = Some(Utc::now());

        Ok(&self.phases[0])
    }

    /// Record the score of one leg
    ///
    /// When the leg decides the match the result is settled immediately:
    /// goals and the win are credited, the bonus is paid for a non-final
    /// match, and a decided final finishes the tournament.
    ///
    /// # Errors
    ///
    /// * `MatchNotFound` - No match with this ID
    /// * `InvalidScore` - Negative goals, or more than `MAX_GOALS_PER_LEG`
    /// * `MatchAlreadyDecided` - The match has a winner
    /// * `LegOutOfOrder` - `leg` is not the next leg of the match
    pub fn register_score(
        &mut self,
        match_id: MatchId,
        leg: Leg,
        goals_p1: i64,
        goals_p2: i64,
    ) -> TournamentResult<&Match> {
        let fixture = self
            .phases
            .iter_mut()
            .find_map(|phase| phase.find_match_mut(match_id))
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        let score = parse_score(goals_p1, goals_p2)?;

        let outcome = fixture.record_leg(leg, score)?;
        log::debug!(
            "Match {match_id} {leg} leg: {}-{} ({outcome:?})",
            score.player1,
            score.player2
        );

        if let LegOutcome::Decided { .. } = outcome {
            let decided = fixture.clone();
            self.settle(&decided);
        }

        self.find_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))
    }

    /// Supply the shootout winner of a level match
    ///
    /// # Errors
    ///
    /// * `MatchNotFound` - No match with this ID
    /// * `NotPendingPenalties` - The match is not level after all legs
    /// * `InvalidWinner` - `winner` is not playing this match
    pub fn set_penalty_winner(
        &mut self,
        match_id: MatchId,
        winner: PlayerId,
    ) -> TournamentResult<&Match> {
        let fixture = self
            .phases
            .iter_mut()
            .find_map(|phase| phase.find_match_mut(match_id))
            .ok_or(TournamentError::MatchNotFound(match_id))?;

        let loser = fixture.resolve_penalties(winner)?;
        log::info!("Match {match_id} decided on penalties: {winner} beat {loser}");

        let decided = fixture.clone();
        self.settle(&decided);

        self.find_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))
    }

    /// Pair the survivors of the current phase into the next one
    ///
    /// # Errors
    ///
    /// * `NotInProgress` - No bracket has been drawn
    /// * `AlreadyFinal` - The current phase is the final
    /// * `PhaseNotReady` - The current phase has undecided matches
    pub fn advance_phase(&mut self) -> TournamentResult<&Phase> {
        let current = self.phases.last().ok_or(TournamentError::NotInProgress)?;

        let mut next_match_id = self.next_match_id;
        let next = next_phase(current, &mut next_match_id)?;

        log::info!(
            "Advanced from phase {} to phase {}{}",
            current.number(),
            next.number(),
            if next.is_final() { " (final)" } else { "" }
        );

        if let Some(current) = self.phases.last_mut() {
            current.mark_advanced();
        }
        self.phases.push(next);
        self.next_match_id = next_match_id;

        self.current_phase().ok_or(TournamentError::NotInProgress)
    }

    /// Matches in the current phase with a leg still to play
    pub fn next_matches(&self) -> Vec<NextMatch> {
        self.current_phase()
            .map(|phase| {
                phase
                    .next_matches()
                    .map(|(fixture, next_leg)| NextMatch {
                        fixture: fixture.clone(),
                        next_leg,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rankings over the confirmed players
    pub fn rankings(&self) -> Rankings {
        Rankings::compute(self.roster.confirmed())
    }

    pub fn overview(&self) -> TournamentOverview {
        let standing = |id: Option<PlayerId>| {
            id.and_then(|id| self.roster.get(id))
                .map(PlayerStanding::from)
        };

        TournamentOverview {
            status: self.status,
            entry_fee: self.settings.entry_fee,
            bonus_per_win: self.settings.bonus_per_win,
            total_prize: self.total_prize(),
            confirmed_count: self.roster.confirmed_count(),
            current_phase: self.current_phase().map(Phase::number),
            phase_count: self.phases.len(),
            champion: standing(self.champion),
            runner_up: standing(self.runner_up),
            top_scorer: standing(self.top_scorer),
            total_goals: self
                .roster
                .confirmed()
                .fold(0, |total: u32, p| total.saturating_add(p.goals)),
            prize: self.prize,
            draw_seed: self.draw_seed,
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    /// Wipe everything back to pre-tournament
    ///
    /// Player names and settings are kept; confirmations, totals, phases and
    /// results are discarded.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for a wrong code, leaving state untouched
    pub fn reset(&mut self, auth: &AuthCode, code: &str) -> TournamentResult<()> {
        authorize(auth, code, "reset")?;

        let mut roster = std::mem::take(&mut self.roster);
        roster.reset();
        *self = Self::new(roster, self.settings);

        log::info!("Tournament reset");
        Ok(())
    }

    /// Credit a freshly decided match to its players
    fn settle(&mut self, decided: &Match) {
        let (Some(winner), Some(loser)) = (decided.winner(), decided.loser()) else {
            return;
        };

        for id in [decided.player1(), decided.player2()] {
            if let Some(player) = self.roster.get_mut(id) {
                player.goals = player.goals.saturating_add(decided.goals_for(id));
            }
        }

        if let Some(player) = self.roster.get_mut(winner) {
            player.wins += 1;
            if !decided.is_final() {
                player.earnings += self.settings.bonus_per_win;
            }
        }

        if decided.is_final() {
            self.finish(winner, loser);
        }
    }

    /// Close the tournament once the final has a winner
    fn finish(&mut self, champion: PlayerId, runner_up: PlayerId) {
        let bonuses_paid: Money = self.roster.confirmed().map(|p| p.earnings).sum();
        let prize = PrizeDistribution::compute(
            self.settings.entry_fee,
            self.roster.confirmed_count(),
            bonuses_paid,
        );

        if let Some(player) = self.roster.get_mut(champion) {
            player.earnings += prize.champion_prize;
        }
        if let Some(player) = self.roster.get_mut(runner_up) {
            player.earnings += prize.runner_up_prize;
        }

        self.champion = Some(champion);
        self.runner_up = Some(runner_up);
        self.top_scorer = top_scorer(self.roster.confirmed()).map(|p| p.id);
        self.prize = Some(prize);
        self.status = TournamentStatus::Finished;
        self.finished_at = Some(Utc::now());

        log::info!(
            "Tournament finished: champion {champion} (+{}), runner-up {runner_up} (+{})",
            prize.champion_prize,
            prize.runner_up_prize
        );
    }
}

fn authorize(auth: &AuthCode, code: &str, operation: &str) -> TournamentResult<()> {
    if auth.verify(code) {
        Ok(())
    } else {
        log::warn!("Rejected {operation}: invalid authorization code");
        Err(TournamentError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bracket::DrawPolicy, fixture::MatchFormat, phase::PhaseState};

    const CODE: &str = "1234";

    fn auth() -> AuthCode {
        AuthCode::new(CODE)
    }

    fn tournament(names: &[&str]) -> Tournament {
        let settings =
            TournamentSettings::new(Money::from_units(10), Money::from_units(2), DrawPolicy::Ordered);
        let mut t = Tournament::new(Roster::new(names.iter().copied()), settings);
        for id in 1..=names.len() as PlayerId {
            t.toggle_confirmation(id).unwrap();
        }
        t
    }

    fn earnings(t: &Tournament, id: PlayerId) -> Money {
        t.roster().get(id).unwrap().earnings
    }

    #[test]
    fn test_start_requires_auth_before_anything_else() {
        let mut t = Tournament::new(Roster::new(["A"]), TournamentSettings::default());
        assert!(matches!(
            t.start(&auth(), "nope"),
            Err(TournamentError::Unauthorized)
        ));
        assert!(matches!(
            t.start(&auth(), CODE),
            Err(TournamentError::InsufficientPlayers {
                needed: 2,
                current: 0
            })
        ));
        assert_eq!(t.status(), TournamentStatus::PreTournament);
        assert!(t.phases().is_empty());
    }

    #[test]
    fn test_start_twice_fails() {
        let mut t = tournament(&["A", "B"]);
        t.start(&auth(), CODE).unwrap();
        assert!(matches!(
            t.start(&auth(), CODE),
            Err(TournamentError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_invalid_settings_block_start() {
        let settings =
            TournamentSettings::new(Money::from_units(1), Money::from_units(5), DrawPolicy::Ordered);
        let mut t = Tournament::new(Roster::new(["A", "B"]), settings);
        t.toggle_confirmation(1).unwrap();
        t.toggle_confirmation(2).unwrap();
        assert!(matches!(
            t.start(&auth(), CODE),
            Err(TournamentError::InvalidSettings(_))
        ));
        assert_eq!(t.status(), TournamentStatus::PreTournament);
    }

    #[test]
    fn test_roster_locked_after_start() {
        let mut t = tournament(&["A", "B", "C"]);
        assert!(matches!(
            t.toggle_confirmation(9),
            Err(TournamentError::PlayerNotFound(9))
        ));
        t.start(&auth(), CODE).unwrap();
        assert!(matches!(
            t.toggle_confirmation(1),
            Err(TournamentError::RosterLocked)
        ));
    }

    #[test]
    fn test_unconfirmed_players_are_left_out() {
        let mut t = tournament(&["A", "B", "C", "D"]);
        t.toggle_confirmation(4).unwrap();
        let phase = t.start(&auth(), CODE).unwrap();
        assert!(phase.is_preliminary());
        assert_eq!(phase.entrants(), 3);
        assert_eq!(t.total_prize(), Money::from_units(30));
    }

    #[test]
    fn test_two_players_play_the_final_immediately() {
        let mut t = tournament(&["A", "B"]);
        let phase = t.start(&auth(), CODE).unwrap();
        assert!(phase.is_final());
        let id = phase.matches()[0].id();

        t.register_score(id, Leg::First, 0, 1).unwrap();
        assert_eq!(t.status(), TournamentStatus::Finished);
        assert_eq!(t.champion(), Some(2));
        assert_eq!(t.runner_up(), Some(1));
        // No bonus for the final: the whole pot is split
        assert_eq!(earnings(&t, 2), Money::from_units(14));
        assert_eq!(earnings(&t, 1), Money::from_units(6));
    }

    #[test]
    fn test_register_score_check_order() {
        let mut t = tournament(&["A", "B", "C", "D"]);
        t.start(&auth(), CODE).unwrap();

        assert!(matches!(
            t.register_score(99, Leg::First, 1, 0),
            Err(TournamentError::MatchNotFound(99))
        ));
        assert!(matches!(
            t.register_score(1, Leg::First, -1, 0),
            Err(TournamentError::InvalidScore { .. })
        ));
        assert!(matches!(
            t.register_score(1, Leg::Second, 1, 0),
            Err(TournamentError::LegOutOfOrder { .. })
        ));
        assert!(!t.find_match(1).unwrap().first_leg_completed());
    }

    #[test]
    fn test_huge_goal_counts_are_rejected_without_side_effects() {
        let mut t = tournament(&["A", "B", "C", "D"]);
        t.start(&auth(), CODE).unwrap();
        let before = t.clone();

        assert!(matches!(
            t.register_score(1, Leg::First, i64::from(u32::MAX), 0),
            Err(TournamentError::InvalidScore { .. })
        ));
        assert_eq!(t, before);

        t.register_score(1, Leg::First, 999, 0).unwrap();
        let m = t.register_score(1, Leg::Second, 1, 0).unwrap();
        assert_eq!(m.winner(), Some(1));
        assert_eq!(t.roster().get(1).unwrap().goals, 1000);
    }

    #[test]
    fn test_decided_match_credits_players() {
        let mut t = tournament(&["A", "B", "C", "D"]);
        t.start(&auth(), CODE).unwrap();

        t.register_score(1, Leg::First, 2, 0).unwrap();
        // Goals are only credited when the match is decided
        assert_eq!(t.roster().get(1).unwrap().goals, 0);

        let m = t.register_score(1, Leg::Second, 1, 1).unwrap();
        assert_eq!(m.winner(), Some(1));

        let a = t.roster().get(1).unwrap();
        assert_eq!((a.wins, a.goals, a.earnings), (1, 3, Money::from_units(2)));
        let b = t.roster().get(2).unwrap();
        assert_eq!((b.wins, b.goals, b.earnings), (0, 1, Money::ZERO));

        assert!(matches!(
            t.register_score(1, Leg::First, 0, 0),
            Err(TournamentError::MatchAlreadyDecided(1))
        ));
    }

    #[test]
    fn test_penalty_flow() {
        let mut t = tournament(&["A", "B", "C", "D"]);
        t.start(&auth(), CODE).unwrap();

        t.register_score(2, Leg::First, 1, 1).unwrap();
        let m = t.register_score(2, Leg::Second, 1, 1).unwrap();
        assert!(m.is_pending_penalty());
        assert!(matches!(
            t.set_penalty_winner(1, 1),
            Err(TournamentError::NotPendingPenalties(1))
        ));
        assert!(matches!(
            t.set_penalty_winner(2, 1),
            Err(TournamentError::InvalidWinner {
                match_id: 2,
                player_id: 1
            })
        ));

        let m = t.set_penalty_winner(2, 4).unwrap();
        assert!(m.decided_by_penalties());
        let d = t.roster().get(4).unwrap();
        assert_eq!((d.wins, d.goals, d.earnings), (1, 2, Money::from_units(2)));
        assert_eq!(t.roster().get(3).unwrap().goals, 2);
    }

    #[test]
    fn test_advance_requires_ready_phase() {
        let mut t = tournament(&["A", "B", "C", "D"]);
        assert!(matches!(
            t.advance_phase(),
            Err(TournamentError::NotInProgress)
        ));

        t.start(&auth(), CODE).unwrap();
        t.register_score(1, Leg::First, 1, 0).unwrap();
        t.register_score(1, Leg::Second, 1, 0).unwrap();
        assert!(matches!(
            t.advance_phase(),
            Err(TournamentError::PhaseNotReady {
                phase: 1,
                pending: 1
            })
        ));
        assert_eq!(t.phases().len(), 1);

        t.register_score(2, Leg::First, 0, 3).unwrap();
        t.register_score(2, Leg::Second, 0, 0).unwrap();

        let final_phase = t.advance_phase().unwrap();
        assert!(final_phase.is_final());
        let m = &final_phase.matches()[0];
        assert_eq!((m.id(), m.player1(), m.player2()), (3, 1, 4));
        assert_eq!(m.format(), MatchFormat::SingleLeg);
        assert_eq!(t.phases()[0].state(), PhaseState::Advanced);

        t.register_score(3, Leg::First, 1, 0).unwrap();
        assert!(matches!(
            t.advance_phase(),
            Err(TournamentError::AlreadyFinal)
        ));
    }

    #[test]
    fn test_next_matches_annotate_leg() {
        let mut t = tournament(&["A", "B", "C", "D"]);
        assert!(t.next_matches().is_empty());
        t.start(&auth(), CODE).unwrap();
        t.register_score(1, Leg::First, 1, 0).unwrap();

        let next: Vec<_> = t
            .next_matches()
            .into_iter()
            .map(|n| (n.fixture.id(), n.next_leg))
            .collect();
        assert_eq!(next, vec![(1, Leg::Second), (2, Leg::First)]);
    }

    #[test]
    fn test_reset_keeps_names_and_settings() {
        let mut t = tournament(&["A", "B"]);
        t.start(&auth(), CODE).unwrap();
        t.register_score(1, Leg::First, 3, 2).unwrap();

        assert!(matches!(
            t.reset(&auth(), "0000"),
            Err(TournamentError::Unauthorized)
        ));
        assert_eq!(t.status(), TournamentStatus::Finished);

        t.reset(&auth(), CODE).unwrap();
        assert_eq!(t.status(), TournamentStatus::PreTournament);
        assert!(t.phases().is_empty());
        assert!(t.champion().is_none());
        assert!(t.prize().is_none());
        assert_eq!(t.players().len(), 2);
        assert_eq!(t.players()[0].name, "A");
        assert!(t.players().iter().all(|p| !p.confirmed
            && p.wins == 0
            && p.goals == 0
            && p.earnings == Money::ZERO));
        assert_eq!(t.settings().entry_fee, Money::from_units(10));
    }

    #[test]
    fn test_overview_before_and_after() {
        let mut t = tournament(&["A", "B"]);
        let overview = t.overview();
        assert_eq!(overview.status, TournamentStatus::PreTournament);
        assert_eq!(overview.total_prize, Money::from_units(20));
        assert_eq!(overview.current_phase, None);

        t.start(&auth(), CODE).unwrap();
        t.register_score(1, Leg::First, 2, 2).unwrap();
        t.set_penalty_winner(1, 1).unwrap();

        let overview = t.overview();
        assert_eq!(overview.status, TournamentStatus::Finished);
        assert_eq!(overview.current_phase, Some(1));
        assert_eq!(overview.champion.map(|s| s.id), Some(1));
        assert_eq!(overview.runner_up.map(|s| s.id), Some(2));
        // Level on goals: first in roster order
        assert_eq!(overview.top_scorer.map(|s| s.id), Some(1));
        assert_eq!(overview.total_goals, 4);
        assert!(overview.finished_at.is_some());
    }
}
