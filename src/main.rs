//! Server binary: open the store, clean it once, then serve the API.

use pokedex_api::{
    clean, connect, ensure_schema, router, AppConfig, AppState, PokeApiClient,
    RandomTrainerSelector,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokedex_api=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = connect(&config.database_path).await?;
    ensure_schema(&pool).await?;

    // One-shot cleanup before any traffic. A failed run rolls back and the
    // previous state keeps serving.
    if let Err(e) = clean(&pool).await {
        tracing::error!(error = %e, "database cleaning failed, serving prior state");
    }

    let source = PokeApiClient::new(&config.pokeapi_base_url, config.fetch_timeout)?;
    let state = AppState {
        pool,
        source: Arc::new(source),
        trainers: Arc::new(RandomTrainerSelector),
    };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
