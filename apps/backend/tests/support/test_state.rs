use guessr_backend::infra::state::build_state;
use guessr_backend::{AppError, AppState, DbProfile, SecurityConfig};

pub const TEST_JWT_SECRET: &str = "test-secret-0123456789abcdef0123456789";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET.as_bytes())
}

/// Fresh, migrated in-memory database per call.
///
/// The pool holds one connection, so transactions on it never overlap.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbProfile::InMemory)
        .with_security(test_security())
        .build()
        .await
}

/// Postgres test database from `TEST_DB` and the `APP_DB_*` credentials.
///
/// Returns `None` when `TEST_DB` is unset. The schema must already be
/// migrated (`migration --env test up`); startup fails otherwise.
pub async fn build_pg_test_state() -> Option<AppState> {
    if std::env::var("TEST_DB").is_err() {
        tracing::warn!("TEST_DB not set; skipping Postgres test");
        return None;
    }
    let state = build_state()
        .with_db(DbProfile::Test)
        .with_security(test_security())
        .build()
        .await
        .expect("build Postgres test state");
    Some(state)
}
