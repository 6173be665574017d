//! Environment-driven configuration, read once at startup.

use crate::error::AppError;
use std::time::Duration;

const DEFAULT_DATABASE_PATH: &str = "pokedex.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the SQLite database file holding the seeded dataset.
    pub database_path: String,
    pub bind_addr: String,
    /// Base URL of the external Pokémon data source.
    pub pokeapi_base_url: String,
    /// Bound on the single external fetch attempt per ingestion call.
    pub fetch_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let pokeapi_base_url = std::env::var("POKEAPI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_POKEAPI_BASE_URL.into());
        let fetch_timeout = match std::env::var("FETCH_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| AppError::Config(format!("invalid FETCH_TIMEOUT_SECS: {raw}")))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        };
        Ok(Self {
            database_path,
            bind_addr,
            pokeapi_base_url,
            fetch_timeout,
        })
    }
}
