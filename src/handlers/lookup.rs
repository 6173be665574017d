//! Read-only handlers: root message plus the four relation lookups.

use crate::error::AppError;
use crate::service::LookupService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct RootBody {
    pub message: &'static str,
}

pub async fn root() -> Json<RootBody> {
    Json(RootBody {
        message: "Welcome to the Pokedex data API",
    })
}

pub async fn pokemon_by_ability(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = LookupService::pokemon_by_ability(&state.pool, &name).await?;
    Ok(Json(names))
}

pub async fn pokemon_by_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = LookupService::pokemon_by_type(&state.pool, &name).await?;
    Ok(Json(names))
}

pub async fn trainers_by_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = LookupService::trainers_by_pokemon(&state.pool, &name).await?;
    Ok(Json(names))
}

pub async fn abilities_by_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = LookupService::abilities_by_pokemon(&state.pool, &name).await?;
    Ok(Json(names))
}
