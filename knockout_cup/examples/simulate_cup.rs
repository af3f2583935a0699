//! Tournament Simulation Example
//!
//! Runs a seeded cup for a seven-player roster: play-in round, two-legged
//! ties, a shootout, the final and the payout.

use knockout_cup::{AuthCode, DrawPolicy, Money, Roster, Tournament, TournamentSettings, TournamentStatus};

fn main() {
    println!("=== Knockout Cup Simulation ===\n");

    let names = ["Ana", "Bruno", "Carla", "Davi", "Eva", "Felipe", "Gabi"];
    let settings = TournamentSettings::new(
        Money::from_units(10),
        Money::from_units(2),
        DrawPolicy::Seeded(2024),
    );
    let mut cup = Tournament::new(Roster::new(names), settings);
    for id in 1..=names.len() as i64 {
        cup.toggle_confirmation(id).unwrap();
    }

    let auth = AuthCode::new("demo");
    cup.start(&auth, "demo").unwrap();
    println!("Prize pool: {}\n", cup.total_prize());

    let mut round = 0;
    while cup.status() == TournamentStatus::InProgress {
        let phase = cup.current_phase().unwrap().clone();
        let title = if phase.is_final() {
            "Final".to_string()
        } else if phase.is_preliminary() {
            "Preliminary round".to_string()
        } else {
            format!("Phase {}", phase.number())
        };
        println!("--- {title} ---");
        for bye in phase.byes() {
            println!("  bye: {}", cup.roster().get(*bye).unwrap().name);
        }

        // Deterministic scorelines so that some ties go to penalties
        for next in cup.next_matches() {
            round += 1;
            let id = next.fixture.id();
            let (g1, g2) = match round % 3 {
                0 => (1, 1),
                1 => (2, 0),
                _ => (0, 1),
            };
            let fixture = cup.register_score(id, next.next_leg, g1, g2).unwrap().clone();
            if fixture.is_pending_penalty() {
                cup.set_penalty_winner(id, fixture.player1()).unwrap();
            }
        }
        // Second legs of two-legged ties
        for next in cup.next_matches() {
            let id = next.fixture.id();
            let fixture = cup.register_score(id, next.next_leg, 1, 1).unwrap().clone();
            if fixture.is_pending_penalty() {
                cup.set_penalty_winner(id, fixture.player2()).unwrap();
            }
        }

        for fixture in cup.current_phase().unwrap().matches() {
            let name = |id| cup.roster().get(id).unwrap().name.as_str();
            let aggregate = fixture.aggregate();
            println!(
                "  {} {} x {} {}{}",
                name(fixture.player1()),
                aggregate.player1,
                aggregate.player2,
                name(fixture.player2()),
                if fixture.decided_by_penalties() { " (pens)" } else { "" }
            );
        }

        if cup.status() == TournamentStatus::InProgress {
            cup.advance_phase().unwrap();
        }
        println!();
    }

    let overview = cup.overview();
    println!("Champion:   {}", overview.champion.map(|s| s.name).unwrap_or_default());
    println!("Runner-up:  {}", overview.runner_up.map(|s| s.name).unwrap_or_default());
    println!("Top scorer: {}", overview.top_scorer.map(|s| s.name).unwrap_or_default());
    println!("\nEarnings:");
    for standing in cup.rankings().by_earnings {
        println!("  {:<8} {:>6}", standing.name, standing.earnings.to_string());
    }
}
