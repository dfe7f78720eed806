use std::time::Duration;

use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::{AppState, DEFAULT_TXN_TIMEOUT};
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the test harness.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    txn_timeout: Duration,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            txn_timeout: DEFAULT_TXN_TIMEOUT,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_txn_timeout(mut self, txn_timeout: Duration) -> Self {
        self.txn_timeout = txn_timeout;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db_profile {
            Some(profile) => {
                let conn = bootstrap_db(profile, DbOwner::App).await?;
                AppState::new(conn, self.security_config)
            }
            None => AppState::new_without_db(self.security_config),
        };
        Ok(state.with_txn_timeout(self.txn_timeout))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
