//! Integration tests for the shared tournament manager.
//!
//! Tests concurrent writers, read-your-writes, and persistence through the
//! JSON snapshot store across restarts.

use knockout_cup::{
    AuthCode, DrawPolicy, JsonFileStore, Leg, Money, PlayerId, Roster, TournamentError,
    TournamentManager, TournamentSettings, TournamentStatus, TournamentStore,
};
use std::{path::PathBuf, sync::Arc};

const CODE: &str = "4321";

fn settings() -> TournamentSettings {
    TournamentSettings::new(Money::from_units(10), Money::from_units(2), DrawPolicy::Ordered)
}

fn roster(size: usize) -> Roster {
    Roster::new((1..=size).map(|i| format!("Player {i}")))
}

/// Unique snapshot path under the system temp dir
fn temp_snapshot() -> PathBuf {
    std::env::temp_dir()
        .join(format!("knockout_cup_it_{}", uuid::Uuid::new_v4()))
        .join("tournament.json")
}

async fn started_manager(size: usize) -> TournamentManager {
    let manager = TournamentManager::in_memory(roster(size), settings(), AuthCode::new(CODE));
    for id in 1..=size as PlayerId {
        manager.toggle_confirmation(id).await.unwrap();
    }
    manager.start(CODE).await.unwrap();
    manager
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scores_on_same_leg() {
    let manager = started_manager(4).await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let manager = manager.clone();
        handles.push(tokio::spawn(async move {
            manager.register_score(1, Leg::First, i % 4, 0).await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(TournamentError::LegOutOfOrder { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    // Exactly one writer observed the leg as unplayed
    assert_eq!(accepted, 1);
    let phase = manager.current_phase().await.unwrap();
    assert!(phase.matches()[0].first_leg_completed());
    assert!(!phase.matches()[0].second_leg_completed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_toggles_are_serialized() {
    let manager = TournamentManager::in_memory(roster(8), settings(), AuthCode::new(CODE));

    let mut handles = Vec::new();
    for id in 1..=8 {
        for _ in 0..3 {
            let manager = manager.clone();
            handles.push(tokio::spawn(async move {
                manager.toggle_confirmation(id).await.unwrap();
            }));
        }
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Three flips each: every player ends confirmed
    let players = manager.players().await;
    assert!(players.iter().all(|p| p.confirmed));
    assert_eq!(manager.overview().await.confirmed_count, 8);
    assert_eq!(manager.overview().await.total_prize, Money::from_units(80));
}

#[tokio::test]
async fn test_reads_reflect_completed_writes() {
    let manager = started_manager(2).await;

    let next = manager.next_matches().await;
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].next_leg, Leg::First);

    manager.register_score(1, Leg::First, 2, 3).await.unwrap();

    let overview = manager.overview().await;
    assert_eq!(overview.status, TournamentStatus::Finished);
    assert_eq!(overview.champion.map(|c| c.id), Some(2));
    assert!(manager.next_matches().await.is_empty());

    let rankings = manager.rankings().await;
    assert_eq!(rankings.by_wins[0].id, 2);
    assert_eq!(rankings.by_earnings[0].earnings, Money::from_units(14));
}

#[tokio::test]
async fn test_json_store_survives_restart() {
    let path = temp_snapshot();

    {
        let store = Arc::new(JsonFileStore::new(&path));
        let manager =
            TournamentManager::open(store, AuthCode::new(CODE), roster(4), settings())
                .await
                .unwrap();
        for id in 1..=4 {
            manager.toggle_confirmation(id).await.unwrap();
        }
        manager.start(CODE).await.unwrap();
        manager.register_score(1, Leg::First, 1, 0).await.unwrap();
        manager.register_score(1, Leg::Second, 2, 2).await.unwrap();
    }

    // A different configured roster is ignored in favour of the snapshot
    let store = Arc::new(JsonFileStore::new(&path));
    let manager = TournamentManager::open(store, AuthCode::new(CODE), roster(2), settings())
        .await
        .unwrap();

    let snapshot = manager.snapshot().await;
    assert_eq!(snapshot.status(), TournamentStatus::InProgress);
    assert_eq!(snapshot.players().len(), 4);
    assert_eq!(snapshot.find_match(1).unwrap().winner(), Some(1));
    assert_eq!(snapshot.roster().get(1).unwrap().earnings, Money::from_units(2));

    // Match ids keep counting from the snapshot
    manager.register_score(2, Leg::First, 0, 1).await.unwrap();
    manager.register_score(2, Leg::Second, 0, 1).await.unwrap();
    let final_phase = manager.advance_phase().await.unwrap();
    assert_eq!(final_phase.matches()[0].id(), 3);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_reset_is_persisted() {
    let path = temp_snapshot();
    let store = Arc::new(JsonFileStore::new(&path));
    let manager = TournamentManager::open(store.clone(), AuthCode::new(CODE), roster(2), settings())
        .await
        .unwrap();

    manager.toggle_confirmation(1).await.unwrap();
    manager.toggle_confirmation(2).await.unwrap();
    manager.start(CODE).await.unwrap();
    manager.register_score(1, Leg::First, 1, 0).await.unwrap();
    manager.reset(CODE).await.unwrap();

    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.status(), TournamentStatus::PreTournament);
    assert!(saved.players().iter().all(|p| !p.confirmed && p.earnings == Money::ZERO));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_start_returns_state_of_its_own_write() {
    let seeded =
        TournamentSettings::new(Money::from_units(10), Money::from_units(2), DrawPolicy::Seeded(99));

    for _ in 0..8 {
        let manager = TournamentManager::in_memory(roster(5), seeded, AuthCode::new(CODE));
        for id in 1..=5 {
            manager.toggle_confirmation(id).await.unwrap();
        }

        let starter = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.start(CODE).await })
        };
        let resetter = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.reset(CODE).await })
        };
        resetter.await.unwrap().unwrap();

        match starter.await.unwrap() {
            Ok(started) => {
                // A reset landing after the start does not leak into what it returned
                assert_eq!(started.status(), TournamentStatus::InProgress);
                assert_eq!(started.draw_seed(), Some(99));
                assert_eq!(started.roster().confirmed_count(), 5);
                let phase = started.current_phase().unwrap();
                assert!(phase.is_preliminary());
                assert!(phase.matches().iter().all(|m| {
                    started.roster().get(m.player1()).is_some()
                        && started.roster().get(m.player2()).is_some()
                }));
            }
            Err(TournamentError::InsufficientPlayers { current: 0, .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
