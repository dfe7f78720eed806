use actix_web::http::StatusCode;
use guessr_backend::domain::{GameMode, GameStatus, RoundStatus};
use guessr_backend::errors::ErrorCode;
use guessr_backend::infra::state::build_state;
use guessr_backend::services::single_player::{CreateGameInput, SinglePlayerService};
use uuid::Uuid;

use crate::support::{build_test_state, seed_map};

fn input(player_id: Uuid, map_id: Uuid) -> CreateGameInput {
    CreateGameInput {
        player_id,
        map_id,
        mode: GameMode::Move,
        round_seconds: 60,
    }
}

#[tokio::test]
async fn creates_game_and_starts_first_round() {
    let state = build_test_state().await.unwrap();
    let seeded = seed_map(state.db().unwrap(), 5).await;
    let player = Uuid::new_v4();
    let service = SinglePlayerService::new();

    let out = service
        .create_game(None, &state, input(player, seeded.map_id))
        .await
        .unwrap();

    assert_eq!(out.player_id, player);
    assert_eq!(out.map_id, seeded.map_id);
    assert_eq!(out.mode, GameMode::Move);
    assert_eq!(out.first_round.round_number, 1);
    assert_eq!(out.first_round.status, RoundStatus::InProgress);
    assert_eq!(out.first_round.round_seconds, 60);
    assert!(out.first_round.panorama.is_some());
    assert!(out.first_round.answer.is_none());
    assert!(out.first_round.started_at.is_some());

    let view = service
        .get_game(None, &state, player, out.id)
        .await
        .unwrap();
    assert_eq!(view.status, GameStatus::InProgress);
    assert_eq!(view.current_round, 1);
    assert_eq!(view.total_rounds, 5);
    assert_eq!(view.score, 0);
    assert!(view.started_at.is_some());
    assert_eq!(view.rounds.len(), 5);
    for (i, round) in view.rounds.iter().enumerate() {
        assert_eq!(usize::from(round.round_number), i + 1);
    }
    for round in &view.rounds[1..] {
        assert_eq!(round.status, RoundStatus::Pending);
        assert!(round.panorama.is_none());
    }
}

#[tokio::test]
async fn rounds_use_distinct_locations_from_the_map() {
    let state = build_test_state().await.unwrap();
    let seeded = seed_map(state.db().unwrap(), 5).await;
    let player = Uuid::new_v4();
    let service = SinglePlayerService::new();

    let out = service
        .create_game(None, &state, input(player, seeded.map_id))
        .await
        .unwrap();

    let rounds = guessr_backend::repos::rounds::find_all_by_game(state.db().unwrap(), out.id)
        .await
        .unwrap();
    let mut location_ids: Vec<Uuid> = rounds.iter().map(|r| r.location_id).collect();
    location_ids.sort();
    location_ids.dedup();
    assert_eq!(location_ids.len(), 5);
    assert!(location_ids.iter().all(|id| seeded.location_ids.contains(id)));
}

#[tokio::test]
async fn second_active_game_for_player_conflicts() {
    let state = build_test_state().await.unwrap();
    let seeded = seed_map(state.db().unwrap(), 5).await;
    let player = Uuid::new_v4();
    let service = SinglePlayerService::new();

    service
        .create_game(None, &state, input(player, seeded.map_id))
        .await
        .unwrap();
    let err = service
        .create_game(None, &state, input(player, seeded.map_id))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ActiveGameExists);
    assert_eq!(err.status(), StatusCode::CONFLICT);

    // Another player is unaffected.
    service
        .create_game(None, &state, input(Uuid::new_v4(), seeded.map_id))
        .await
        .unwrap();
}

#[tokio::test]
async fn map_without_locations_is_not_found() {
    let state = build_test_state().await.unwrap();
    let seeded = seed_map(state.db().unwrap(), 0).await;
    let service = SinglePlayerService::new();

    let err = service
        .create_game(None, &state, input(Uuid::new_v4(), seeded.map_id))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MapNotFound);

    let err = service
        .create_game(None, &state, input(Uuid::new_v4(), Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MapNotFound);
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_creation_leaves_player_free() {
    let state = build_test_state().await.unwrap();
    let empty = seed_map(state.db().unwrap(), 0).await;
    let seeded = seed_map(state.db().unwrap(), 5).await;
    let player = Uuid::new_v4();
    let service = SinglePlayerService::new();

    service
        .create_game(None, &state, input(player, empty.map_id))
        .await
        .unwrap_err();

    service
        .create_game(None, &state, input(player, seeded.map_id))
        .await
        .unwrap();
}

#[tokio::test]
async fn round_duration_checked_before_any_io() {
    // No database: a duration error proves validation ran first.
    let state = build_state().build().await.unwrap();
    let service = SinglePlayerService::new();

    for secs in [0, 9, 301] {
        let err = service
            .create_game(
                None,
                &state,
                CreateGameInput {
                    round_seconds: secs,
                    ..input(Uuid::new_v4(), Uuid::new_v4())
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRoundDuration, "secs={secs}");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
