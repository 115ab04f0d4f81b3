//! Configuration management for TaskNest.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `5000`.
//! - `TASKNEST_DB_PATH` - Optional. SQLite database file. Defaults to `tasknest.db`.
//! - `TASKNEST_API_URL` - Optional. Base URL the client talks to. Defaults to
//!   `http://127.0.0.1:5000/api`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server and client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// SQLite database file backing the task store
    pub db_path: PathBuf,

    /// Base URL for the client API (includes the `/api` prefix)
    pub api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` is not a valid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let db_path = std::env::var("TASKNEST_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("tasknest.db"));

        let api_url = std::env::var("TASKNEST_API_URL")
            .unwrap_or_else(|_| format!("http://{}:{}/api", host, port));

        Ok(Self {
            host,
            port,
            db_path,
            api_url,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(host: String, port: u16, db_path: PathBuf) -> Self {
        let api_url = format!("http://{}:{}/api", host, port);
        Self {
            host,
            port,
            db_path,
            api_url,
        }
    }
}
