use guessr_backend::domain::{Game, GameMode, Location, RoundStatus};
use guessr_backend::repos::{games, locations, rounds};
use uuid::Uuid;

use crate::support::{build_test_state, seed_map};

#[tokio::test]
async fn rounds_persist_and_load_in_order() {
    let state = build_test_state().await.unwrap();
    let conn = state.db().unwrap();
    let seeded = seed_map(conn, 5).await;
    let sampled: Vec<Location> = locations::sample_by_map(conn, seeded.map_id, 5).await.unwrap();

    let mut game = Game::new(Uuid::new_v4(), seeded.map_id, GameMode::NoMove, 45);
    game.add_rounds_from_locations(&sampled);
    games::create(conn, &game).await.unwrap();

    let loaded = rounds::find_all_by_game(conn, game.id).await.unwrap();
    let numbers: Vec<u8> = loaded.iter().map(|r| r.round_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert!(loaded.iter().all(|r| r.status == RoundStatus::Pending));
    assert!(loaded.iter().all(|r| r.round_seconds == 45));

    let third = rounds::find_by_game_and_number_locked(conn, game.id, 3)
        .await
        .unwrap()
        .expect("round 3");
    assert_eq!(third.id, game.rounds[2].id);
    assert!(rounds::find_by_game_and_number_locked(conn, game.id, 6)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn guess_fields_round_trip() {
    let state = build_test_state().await.unwrap();
    let conn = state.db().unwrap();
    let seeded = seed_map(conn, 1).await;
    let sampled = locations::sample_by_map(conn, seeded.map_id, 5).await.unwrap();

    let mut game = Game::new(Uuid::new_v4(), seeded.map_id, GameMode::Move, 60);
    game.add_rounds_from_locations(&sampled);
    games::create(conn, &game).await.unwrap();

    let mut round = game.rounds[0].clone();
    round.start().unwrap();
    round.apply_guess(12.5, -45.25, 1234.5, 4321);
    round.finish().unwrap();
    rounds::update(conn, &round).await.unwrap();

    let loaded = rounds::find_by_id_and_game_locked(conn, round.id, game.id)
        .await
        .unwrap()
        .expect("round");
    assert_eq!(loaded.status, RoundStatus::Completed);
    assert_eq!(loaded.guess_latitude, Some(12.5));
    assert_eq!(loaded.guess_longitude, Some(-45.25));
    assert_eq!(loaded.distance_meters, 1234.5);
    assert_eq!(loaded.score, 4321);
    assert!(loaded.started_at.is_some());
    assert!(loaded.ended_at.is_some());

    // Scoped to its game
    assert!(rounds::find_by_id_and_game_locked(conn, round.id, Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}
