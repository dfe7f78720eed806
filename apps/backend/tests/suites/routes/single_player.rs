use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use guessr_backend::{routes, RequestTrace, TraceSpan};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::support::auth::bearer;
use crate::support::{build_test_state, seed_map, SeededMap};

async fn app_with_map(
    locations: usize,
) -> (
    impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    SeededMap,
) {
    let state = build_test_state().await.unwrap();
    let seeded = seed_map(state.db().unwrap(), locations).await;
    let app = test::init_service(
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;
    (app, seeded)
}

fn create_req(player: Uuid, body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/single-player/games")
        .insert_header(bearer(player))
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn create_play_and_read_back() {
    let (app, seeded) = app_with_map(5).await;
    let player = Uuid::new_v4();

    let resp = test::call_service(
        &app,
        create_req(
            player,
            json!({"map_id": seeded.map_id, "mode": "nmpz", "round_seconds_duration": 90}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["player_id"], player.to_string());
    assert_eq!(created["mode"], "nmpz");
    assert_eq!(created["first_round"]["round_number"], 1);
    assert_eq!(created["first_round"]["status"], "in_progress");
    assert!(created["first_round"]["answer"].is_null());

    let game_id = created["id"].as_str().unwrap().to_string();
    let round_id = created["first_round"]["id"].as_str().unwrap().to_string();
    let pano_id = created["first_round"]["panorama"]["pano_id"].as_str().unwrap();
    let answer = seeded.answers[pano_id];

    let req = test::TestRequest::post()
        .uri(&format!("/api/single-player/games/{game_id}/rounds/{round_id}/guess"))
        .insert_header(bearer(player))
        .set_json(json!({"latitude": answer.latitude, "longitude": answer.longitude}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let guessed: Value = test::read_body_json(resp).await;
    assert_eq!(guessed["score"], 5000);
    assert_eq!(guessed["total_score"], 5000);
    assert_eq!(guessed["game_ended"], false);
    assert_eq!(guessed["next_round"]["round_number"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/single-player/games/{game_id}"))
        .insert_header(bearer(player))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let view: Value = test::read_body_json(resp).await;
    assert_eq!(view["status"], "in_progress");
    assert_eq!(view["current_round"], 2);
    assert_eq!(view["score"], 5000);
    assert_eq!(view["rounds"][0]["status"], "completed");
    assert_eq!(view["rounds"][0]["answer"]["latitude"], answer.latitude);
}

#[actix_web::test]
async fn second_game_conflicts() {
    let (app, seeded) = app_with_map(5).await;
    let player = Uuid::new_v4();
    let body = json!({"map_id": seeded.map_id, "mode": "move", "round_seconds_duration": 60});

    let resp = test::call_service(&app, create_req(player, body.clone())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, create_req(player, body)).await;
    assert_problem_details_from_service_response(
        resp,
        "ACTIVE_GAME_EXISTS",
        StatusCode::CONFLICT,
        Some("user already in a game"),
    )
    .await;
}

#[actix_web::test]
async fn invalid_create_bodies_are_bad_requests() {
    let (app, seeded) = app_with_map(5).await;
    let player = Uuid::new_v4();

    let resp = test::call_service(
        &app,
        create_req(
            player,
            json!({"map_id": seeded.map_id, "mode": "sprint", "round_seconds_duration": 60}),
        ),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_GAME_MODE",
        StatusCode::BAD_REQUEST,
        Some("sprint"),
    )
    .await;

    let resp = test::call_service(
        &app,
        create_req(
            player,
            json!({"map_id": seeded.map_id, "mode": "move", "round_seconds_duration": 5}),
        ),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_ROUND_DURATION",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    let resp = test::call_service(
        &app,
        create_req(player, json!({"map_id": "not-a-uuid", "mode": "move"})),
    )
    .await;
    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None)
        .await;
}

#[actix_web::test]
async fn unknown_map_is_not_found() {
    let (app, _) = app_with_map(0).await;

    let resp = test::call_service(
        &app,
        create_req(
            Uuid::new_v4(),
            json!({"map_id": Uuid::new_v4(), "mode": "move", "round_seconds_duration": 60}),
        ),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "MAP_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn out_of_range_guess_is_rejected() {
    let (app, _) = app_with_map(5).await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/single-player/games/{}/rounds/{}/guess",
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .insert_header(bearer(Uuid::new_v4()))
        .set_json(json!({"latitude": 91.0, "longitude": 0.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_LATITUDE",
        StatusCode::BAD_REQUEST,
        Some("between -90 and 90"),
    )
    .await;
}

#[actix_web::test]
async fn malformed_path_id_is_bad_request() {
    let (app, _) = app_with_map(0).await;

    let req = test::TestRequest::get()
        .uri("/api/single-player/games/not-a-uuid")
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid path parameter"),
    )
    .await;
}

#[actix_web::test]
async fn foreign_game_is_not_found() {
    let (app, seeded) = app_with_map(5).await;
    let owner = Uuid::new_v4();

    let resp = test::call_service(
        &app,
        create_req(
            owner,
            json!({"map_id": seeded.map_id, "mode": "move", "round_seconds_duration": 60}),
        ),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/single-player/games/{}", created["id"].as_str().unwrap()))
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn oversized_and_non_json_bodies_are_rejected() {
    let (app, _) = app_with_map(0).await;
    let player = Uuid::new_v4();

    let padding = "x".repeat(guessr_backend::extractors::validated_json::MAX_BODY_BYTES);
    let req = test::TestRequest::post()
        .uri("/api/single-player/games")
        .insert_header(bearer(player))
        .insert_header(("content-type", "application/json"))
        .set_payload(format!("{{\"mode\": \"{padding}\"}}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("too large"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/single-player/games")
        .insert_header(bearer(player))
        .insert_header(("content-type", "text/plain"))
        .set_payload("map_id=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("application/json"),
    )
    .await;
}
