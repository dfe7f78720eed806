// Error mapping tables: DomainError -> AppError -> HTTP, without a database.
use actix_web::ResponseError;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::AppError;

#[test]
fn maps_validation_to_400() {
    let cases = [
        (ValidationKind::InvalidLatitude, ErrorCode::InvalidLatitude),
        (ValidationKind::InvalidLongitude, ErrorCode::InvalidLongitude),
        (ValidationKind::InvalidRoundDuration, ErrorCode::InvalidRoundDuration),
        (ValidationKind::GameNotInProgress, ErrorCode::GameNotInProgress),
        (ValidationKind::GameAlreadyCompleted, ErrorCode::GameAlreadyCompleted),
        (ValidationKind::RoundNotInProgress, ErrorCode::RoundNotInProgress),
        (ValidationKind::Other("x".into()), ErrorCode::ValidationError),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 400);
    }
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::ActiveGame, "user already in a game").into();
    assert_eq!(app.code().as_str(), "ACTIVE_GAME_EXISTS");
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = DomainError::conflict(ConflictKind::Other("Unique".into()), "dup").into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let cases = [
        (NotFoundKind::Game, "GAME_NOT_FOUND"),
        (NotFoundKind::Round, "ROUND_NOT_FOUND"),
        (NotFoundKind::Map, "MAP_NOT_FOUND"),
        (NotFoundKind::Other("Record".into()), "NOT_FOUND"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 404);
    }
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::Cancelled, "cancelled").into();
    assert_eq!(app.code().as_str(), "REQUEST_CANCELLED");

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad").into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("x".into()), "other").into();
    assert_eq!(app.code().as_str(), "INTERNAL");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn stage_wrapper_hides_source_but_keeps_conflicts() {
    let wrap = AppError::stage("failed to create game");
    let app = wrap(DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "relation does not exist",
    ));
    assert!(matches!(
        &app,
        AppError::Internal { code: ErrorCode::Internal, detail } if detail == "failed to create game"
    ));

    let wrap = AppError::stage("failed to create game");
    let app = wrap(DomainError::conflict(ConflictKind::ActiveGame, "user already in a game"));
    assert_eq!(app.code(), ErrorCode::ActiveGameExists);
}

#[test]
fn internal_response_uses_generic_detail() {
    let app = AppError::internal(ErrorCode::Internal, "failed to update round");
    let resp = app.error_response();
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    assert!(resp.headers().get("x-trace-id").is_some());
}

#[test]
fn humanized_titles() {
    assert_eq!(AppError::humanize_code("GAME_NOT_FOUND"), "Game Not Found");
}
