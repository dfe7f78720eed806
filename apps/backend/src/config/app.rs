//! Process configuration loaded from environment variables at startup.

use std::env;
use std::time::Duration;

use crate::config::db::DbProfile;
use crate::error::AppError;

const DEFAULT_TXN_TIMEOUT_MS: u64 = 10_000;
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_profile: DbProfile,
    pub jwt_secret: String,
    /// Deadline for a single unit of work in `with_txn`
    pub txn_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match env::var("BACKEND_JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_JWT_SECRET_LEN => secret,
            Ok(_) => {
                return Err(AppError::config(format!(
                    "BACKEND_JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters"
                )))
            }
            Err(_) => return Err(AppError::config("BACKEND_JWT_SECRET must be set")),
        };

        let txn_timeout = match env::var("BACKEND_TXN_TIMEOUT_MS") {
            Ok(raw) => {
                let ms = raw.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                    AppError::config(format!(
                        "BACKEND_TXN_TIMEOUT_MS must be a positive integer, got '{raw}'"
                    ))
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => Duration::from_millis(DEFAULT_TXN_TIMEOUT_MS),
        };

        Ok(Self {
            host,
            port,
            db_profile: DbProfile::Prod,
            jwt_secret,
            txn_timeout,
        })
    }
}
