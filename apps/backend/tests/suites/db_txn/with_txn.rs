use std::panic::AssertUnwindSafe;
use std::time::Duration;

use actix_web::http::StatusCode;
use backend_test_support::unique_helpers::unique_str;
use futures::FutureExt;
use guessr_backend::db::txn::with_txn;
use guessr_backend::db::txn_policy::{current, TxnPolicy};
use guessr_backend::errors::ErrorCode;
use guessr_backend::infra::state::build_state;
use guessr_backend::AppError;
use sea_orm::TransactionTrait;
use tokio_util::sync::CancellationToken;

use crate::support::build_test_state;
use crate::support::db_maps::{count_maps_by_name, insert_marker_map};

#[tokio::test]
async fn commits_on_ok() {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
    let state = build_test_state().await.unwrap();
    let name = unique_str("commit");

    let marker = name.clone();
    with_txn(None, &state, move |txn| {
        Box::pin(async move {
            insert_marker_map(txn, &marker).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap();

    assert_eq!(count_maps_by_name(state.db().unwrap(), &name).await, 1);
}

#[tokio::test]
async fn rolls_back_on_error() {
    let state = build_test_state().await.unwrap();
    let name = unique_str("error");

    let marker = name.clone();
    let result = with_txn(None, &state, move |txn| {
        Box::pin(async move {
            insert_marker_map(txn, &marker).await?;
            Err::<(), _>(AppError::internal(ErrorCode::Internal, "forced failure"))
        })
    })
    .await;

    assert_eq!(result.unwrap_err().code(), ErrorCode::Internal);
    assert_eq!(count_maps_by_name(state.db().unwrap(), &name).await, 0);
}

#[tokio::test]
async fn rolls_back_and_resumes_panic() {
    let state = build_test_state().await.unwrap();
    let name = unique_str("panic");

    let marker = name.clone();
    let outcome = AssertUnwindSafe(with_txn(None, &state, move |txn| {
        Box::pin(async move {
            insert_marker_map(txn, &marker).await?;
            let explode = true;
            if explode {
                panic!("boom inside unit of work");
            }
            Ok::<(), AppError>(())
        })
    }))
    .catch_unwind()
    .await;

    assert!(outcome.is_err(), "panic propagates to the caller");
    assert_eq!(count_maps_by_name(state.db().unwrap(), &name).await, 0);
}

#[tokio::test]
async fn already_cancelled_token_skips_work() {
    let state = build_test_state().await.unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = with_txn(Some(&token), &state, |_txn| {
        Box::pin(async {
            Err::<(), _>(AppError::internal(ErrorCode::Internal, "unit of work ran"))
        })
    })
    .await
    .unwrap_err();

    // Internal would mean the unit of work ran.
    assert_eq!(err.code(), ErrorCode::RequestCancelled);
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn cancellation_mid_flight_rolls_back() {
    let state = build_test_state().await.unwrap();
    let name = unique_str("cancel");
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let marker = name.clone();
    let err = with_txn(Some(&token), &state, move |txn| {
        Box::pin(async move {
            insert_marker_map(txn, &marker).await?;
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<(), AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::RequestCancelled);
    assert_eq!(count_maps_by_name(state.db().unwrap(), &name).await, 0);
}

#[tokio::test]
async fn deadline_rolls_back_with_timeout() {
    let state = build_test_state()
        .await
        .unwrap()
        .with_txn_timeout(Duration::from_millis(50));
    let name = unique_str("timeout");

    let marker = name.clone();
    let err = with_txn(None, &state, move |txn| {
        Box::pin(async move {
            insert_marker_map(txn, &marker).await?;
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<(), AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DbTimeout);
    assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(count_maps_by_name(state.db().unwrap(), &name).await, 0);
}

// The in-memory pool has a single connection; holding a transaction on it
// leaves `with_txn` waiting in `begin()`.
#[tokio::test]
async fn deadline_covers_waiting_for_a_connection() {
    let state = build_test_state()
        .await
        .unwrap()
        .with_txn_timeout(Duration::from_millis(50));
    let held = state.db().unwrap().begin().await.unwrap();

    let err = with_txn(None, &state, |_txn| {
        Box::pin(async {
            Err::<(), _>(AppError::internal(ErrorCode::Internal, "unit of work ran"))
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DbTimeout);
    held.rollback().await.unwrap();
}

#[tokio::test]
async fn cancellation_covers_waiting_for_a_connection() {
    let state = build_test_state().await.unwrap();
    let held = state.db().unwrap().begin().await.unwrap();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = with_txn(Some(&token), &state, |_txn| {
        Box::pin(async {
            Err::<(), _>(AppError::internal(ErrorCode::Internal, "unit of work ran"))
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::RequestCancelled);
    held.rollback().await.unwrap();

    // The pool is usable again once the held transaction ends.
    with_txn(None, &state, |_txn| Box::pin(async { Ok::<(), AppError>(()) }))
        .await
        .unwrap();
}

#[tokio::test]
async fn without_db_is_unavailable() {
    let state = build_state().build().await.unwrap();

    let err = with_txn(None, &state, |_txn| Box::pin(async { Ok::<(), AppError>(()) }))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DbUnavailable);
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}
