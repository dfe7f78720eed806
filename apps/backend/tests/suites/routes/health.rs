use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use guessr_backend::infra::state::build_state;
use guessr_backend::{routes, RequestTrace};
use serde_json::Value;

use crate::support::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_migrations() {
    let state = build_test_state().await.unwrap();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("x-request-id").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body["migrations"].as_str().unwrap().starts_with("m2025"));
}

#[actix_web::test]
async fn health_without_db_is_degraded() {
    let state = build_state().build().await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db"], "error");
}
