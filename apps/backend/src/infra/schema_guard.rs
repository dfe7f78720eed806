use sea_orm::DatabaseConnection;

use crate::error::AppError;

/// Whether migrations have been applied. Health reports this value.
pub async fn ensure_schema_ready(db: &DatabaseConnection) -> bool {
    match migration::get_latest_migration_version(db).await {
        Ok(Some(version)) => {
            tracing::info!(%version, "schema ready");
            true
        }
        Ok(None) => {
            tracing::warn!("database schema not ready: no migrations applied; run the migration CLI with `up`");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read migration table");
            false
        }
    }
}

/// Refuse to serve on an unmigrated Postgres database.
///
/// Schema changes run through the migration CLI under the owner role, so the
/// server never migrates Postgres itself.
pub async fn require_schema_ready(db: &DatabaseConnection) -> Result<(), AppError> {
    if ensure_schema_ready(db).await {
        Ok(())
    } else {
        Err(AppError::config(
            "database schema not migrated; run the migration CLI with `up`",
        ))
    }
}
