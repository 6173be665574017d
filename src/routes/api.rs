//! API routes: root message, relation lookups, external ingestion.

use crate::handlers::{ingest, lookup};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(lookup::root))
        .route("/pokemon/ability/:name", get(lookup::pokemon_by_ability))
        .route("/pokemon/type/:name", get(lookup::pokemon_by_type))
        .route("/trainers/pokemon/:name", get(lookup::trainers_by_pokemon))
        .route("/abilities/pokemon/:name", get(lookup::abilities_by_pokemon))
        .route("/pokemon/create/:name", post(ingest::create_pokemon))
        .with_state(state)
}
