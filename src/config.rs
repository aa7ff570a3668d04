//! Server configuration, read from the environment (and `.env` when present).

use std::env;

use crate::errors::ApiError;
use crate::security::DEFAULT_KEY_PREFIX;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// SQLite file holding the key table
    pub database_path: String,
    /// Fixed prefix of every generated key value
    pub key_prefix: String,
}

impl Config {
    /// Loads `.env`, then reads `HOST`, `PORT`, `DATABASE_PATH` and
    /// `API_KEY_PREFIX`, falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ApiError::InvalidConfig(format!("PORT must be a port number, got {raw:?}")))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            key_prefix: env::var("API_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: "db/api_keys.db".to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}
