use std::collections::HashSet;

use guessr_backend::adapters::locations_sea::{self, LocationCreate};
use guessr_backend::errors::domain::DomainError;
use guessr_backend::repos::locations;
use uuid::Uuid;

use crate::support::{build_test_state, seed_map};

#[tokio::test]
async fn sample_is_distinct_and_scoped_to_map() {
    let state = build_test_state().await.unwrap();
    let conn = state.db().unwrap();
    let seeded = seed_map(conn, 5).await;
    let other = seed_map(conn, 5).await;

    let sampled = locations::sample_by_map(conn, seeded.map_id, 3).await.unwrap();
    assert_eq!(sampled.len(), 3);

    let ids: HashSet<Uuid> = sampled.iter().map(|l| l.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(sampled.iter().all(|l| l.map_id == seeded.map_id));
    assert!(sampled.iter().all(|l| !other.location_ids.contains(&l.id)));
}

#[tokio::test]
async fn sample_returns_fewer_when_map_is_small() {
    let state = build_test_state().await.unwrap();
    let conn = state.db().unwrap();
    let seeded = seed_map(conn, 2).await;

    let sampled = locations::sample_by_map(conn, seeded.map_id, 5).await.unwrap();
    assert_eq!(sampled.len(), 2);

    let empty = locations::sample_by_map(conn, Uuid::new_v4(), 5).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn find_by_id_returns_coordinates() {
    let state = build_test_state().await.unwrap();
    let conn = state.db().unwrap();
    let seeded = seed_map(conn, 1).await;

    let location = locations::find_by_id(conn, seeded.location_ids[0])
        .await
        .unwrap()
        .expect("location");
    let expected = seeded.answers[&location.pano_id];
    assert_eq!(location.coordinates(), expected);

    assert!(locations::find_by_id(conn, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_panorama_in_map_conflicts() {
    let state = build_test_state().await.unwrap();
    let conn = state.db().unwrap();
    let seeded = seed_map(conn, 0).await;

    let item = || LocationCreate {
        pano_id: "same-pano".to_string(),
        latitude: 1.0,
        longitude: 2.0,
        heading: 0.0,
        pitch: 0.0,
    };
    locations_sea::create_locations(conn, seeded.map_id, vec![item()])
        .await
        .unwrap();
    let err = locations_sea::create_locations(conn, seeded.map_id, vec![item()])
        .await
        .unwrap_err();

    assert!(
        matches!(DomainError::from(err), DomainError::Conflict(_, _)),
        "duplicate pano should be a conflict"
    );
}
