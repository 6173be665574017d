//! Shared application state for all routes.

use crate::pokeapi::PokemonSource;
use crate::service::TrainerSelector;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// External data source behind a trait so tests can substitute a canned one.
    pub source: Arc<dyn PokemonSource>,
    /// Trainer assignment strategy; random in production, fixed in tests.
    pub trainers: Arc<dyn TrainerSelector>,
}
