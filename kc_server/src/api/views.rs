//! Response views.
//!
//! Engine types refer to players by id. The UI needs names next to every id,
//! so matches and phases are rendered against the roster before they leave
//! the server.

use knockout_cup::{
    Leg, Match, MatchFormat, MatchId, Phase, PhaseState, PlayerId, Roster, Score,
};
use serde::Serialize;

/// A player as shown inside a match or phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerRef {
    pub fn resolve(roster: &Roster, id: PlayerId) -> Self {
        Self {
            id,
            name: roster
                .get(id)
                .map(|player| player.name.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: MatchId,
    pub phase: u32,
    pub player1: PlayerRef,
    pub player2: PlayerRef,
    pub format: MatchFormat,
    pub is_final: bool,
    pub first_leg: Option<Score>,
    pub second_leg: Option<Score>,
    pub aggregate: Score,
    /// Leg to record next; `None` when every leg is in
    pub next_leg: Option<Leg>,
    pub pending_penalty: bool,
    pub completed: bool,
    pub winner: Option<PlayerRef>,
    pub decided_by_penalties: bool,
}

impl MatchView {
    pub fn new(fixture: &Match, roster: &Roster) -> Self {
        Self {
            id: fixture.id(),
            phase: fixture.phase(),
            player1: PlayerRef::resolve(roster, fixture.player1()),
            player2: PlayerRef::resolve(roster, fixture.player2()),
            format: fixture.format(),
            is_final: fixture.is_final(),
            first_leg: fixture.first_leg(),
            second_leg: fixture.second_leg(),
            aggregate: fixture.aggregate(),
            next_leg: fixture.next_leg(),
            pending_penalty: fixture.is_pending_penalty(),
            completed: fixture.is_decided(),
            winner: fixture.winner().map(|id| PlayerRef::resolve(roster, id)),
            decided_by_penalties: fixture.decided_by_penalties(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseView {
    pub phase_number: u32,
    pub is_final: bool,
    pub is_preliminary: bool,
    pub state: PhaseState,
    /// Every match decided and a further phase exists
    pub ready_to_advance: bool,
    pub matches: Vec<MatchView>,
    /// Level matches still waiting for a shootout winner
    pub awaiting_penalties: Vec<MatchId>,
    pub byes: Vec<PlayerRef>,
    /// Main-bracket bye, if the phase has one
    pub bye_player: Option<PlayerRef>,
}

impl PhaseView {
    pub fn new(phase: &Phase, roster: &Roster) -> Self {
        Self {
            phase_number: phase.number(),
            is_final: phase.is_final(),
            is_preliminary: phase.is_preliminary(),
            state: phase.state(),
            ready_to_advance: phase.state() == PhaseState::Ready,
            matches: phase
                .matches()
                .iter()
                .map(|m| MatchView::new(m, roster))
                .collect(),
            awaiting_penalties: phase.awaiting_penalties().map(Match::id).collect(),
            byes: phase
                .byes()
                .iter()
                .map(|&id| PlayerRef::resolve(roster, id))
                .collect(),
            bye_player: phase
                .bye_player()
                .map(|id| PlayerRef::resolve(roster, id)),
        }
    }
}
