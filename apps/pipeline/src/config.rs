//! Environment-based configuration for the pipeline binary.
//!
//! Connection settings are read once here and passed into stage
//! construction explicitly; nothing downstream touches the environment.

use std::env;

const DEFAULT_DB_PATH: &str = "adspend.db";

/// Default schedule interval: 3 hours.
const DEFAULT_INTERVAL_SECS: u64 = 3 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database standing in for the warehouse.
    pub db_path: String,
    /// Seconds between scheduled pipeline runs.
    pub schedule_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        // .env is optional; real environment variables win.
        dotenvy::dotenv().ok();

        let db_path =
            env::var("ADSPEND_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let schedule_interval_secs = env::var("ADSPEND_SCHEDULE_INTERVAL_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_INTERVAL_SECS);

        Config {
            db_path,
            schedule_interval_secs,
        }
    }
}
