use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use super::security_config::SecurityConfig;

pub const DEFAULT_TXN_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared, cheaply cloneable request state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in some test scenarios)
    db: Option<DatabaseConnection>,
    /// JWT verification settings
    pub security: SecurityConfig,
    /// Deadline applied to every unit of work run through `with_txn`
    pub txn_timeout: Duration,
    /// Cancelled on shutdown so in-flight units of work roll back promptly
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            txn_timeout: DEFAULT_TXN_TIMEOUT,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            txn_timeout: DEFAULT_TXN_TIMEOUT,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_txn_timeout(mut self, txn_timeout: Duration) -> Self {
        self.txn_timeout = txn_timeout;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
