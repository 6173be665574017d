//! Ingestion handler: fetch an external record and reconcile it in.

use crate::error::AppError;
use crate::service::IngestService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct CreatedBody {
    pub id: i64,
}

pub async fn create_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CreatedBody>, AppError> {
    let id = IngestService::ingest(
        &state.pool,
        state.source.as_ref(),
        state.trainers.as_ref(),
        &name,
    )
    .await?;
    Ok(Json(CreatedBody { id }))
}
