//! External Pokémon data source: the trait seam and the PokeAPI-backed client.

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Canonical record for one Pokémon as served by the external source.
///
/// Only the fields this service reconciles are deserialized; the upstream
/// payload carries far more.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonRecord {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

impl PokemonRecord {
    /// Up to two declared type names, in slot order.
    pub fn type_names(&self) -> (Option<&str>, Option<&str>) {
        let mut names = self.types.iter().map(|t| t.kind.name.as_str());
        (names.next(), names.next())
    }

    pub fn ability_names(&self) -> impl Iterator<Item = &str> {
        self.abilities.iter().map(|a| a.ability.name.as_str())
    }
}

/// Read-only source of canonical Pokémon records, queried by lower-cased name.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<PokemonRecord, AppError>;
}

/// PokeAPI-backed source. One attempt per fetch, bounded by the client
/// timeout; no retries.
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("http client init: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn fetch(&self, name: &str) -> Result<PokemonRecord, AppError> {
        let url = format!("{}/pokemon/{}", self.base_url, name.to_lowercase());
        tracing::debug!(url = %url, "fetching external record");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("external source request failed: {e}")))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Pokemon '{name}' not found in external source"
            )));
        }
        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "external source returned status {}",
                response.status()
            )));
        }
        response
            .json::<PokemonRecord>()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed external record: {e}")))
    }
}
