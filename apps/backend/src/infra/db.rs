use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::schema_guard::require_schema_ready;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with a fixed delay, returning the last error.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempt, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn connect_options(profile: DbProfile, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    match profile {
        // Every pooled SQLite memory connection is its own database; keep exactly one.
        DbProfile::InMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbProfile::Prod | DbProfile::Test => {
            opts.max_connections(16)
                .min_connections(1)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
    }
    opts
}

/// Open a pool for the given profile. Runs no migrations.
pub async fn connect_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;

    let conn = match profile {
        DbProfile::InMemory => Database::connect(connect_options(profile, url)).await?,
        DbProfile::Prod | DbProfile::Test => {
            retry_connection(
                || {
                    let opts = connect_options(profile, url.clone());
                    async move { Database::connect(opts).await.map_err(AppError::from) }
                },
                CONNECT_ATTEMPTS,
                CONNECT_RETRY_INTERVAL_MS,
            )
            .await?
        }
    };

    info!(profile = ?profile, owner = ?owner, "database connected");
    Ok(conn)
}

/// Connect and make the schema usable.
///
/// In-memory databases start empty and are migrated here. Postgres profiles
/// are only checked, and an unmigrated schema fails startup.
pub async fn bootstrap_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile, owner).await?;

    match profile {
        DbProfile::InMemory => {
            migrate(&conn, MigrationCommand::Up).await?;
        }
        DbProfile::Prod | DbProfile::Test => {
            require_schema_ready(&conn).await?;
        }
    }

    Ok(conn)
}
