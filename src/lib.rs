//! Pokédex data API: one-shot startup cleaning, read lookups, and
//! external-record ingestion over a SQLite store.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pokeapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use cleaner::clean;
pub use config::AppConfig;
pub use error::AppError;
pub use pokeapi::{PokeApiClient, PokemonRecord, PokemonSource};
pub use routes::router;
pub use service::{IngestService, LookupService, RandomTrainerSelector, TrainerSelector};
pub use state::AppState;
pub use store::{connect, ensure_schema};
