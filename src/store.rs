//! SQLite pool setup and table DDL.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Table DDL, applied idempotently at startup. The dataset itself is seeded
/// out of band; this only guarantees the table shapes exist so a fresh or
/// test database is usable.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS types (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS abilities (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS trainers (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS pokemon (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        type1_id INTEGER REFERENCES types(id),
        type2_id INTEGER REFERENCES types(id)
    )",
    "CREATE TABLE IF NOT EXISTS pokemon_abilities (
        pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
        ability_id INTEGER NOT NULL REFERENCES abilities(id),
        PRIMARY KEY (pokemon_id, ability_id)
    )",
    "CREATE TABLE IF NOT EXISTS trainer_pokemon_abilities (
        id INTEGER PRIMARY KEY,
        trainer_id INTEGER NOT NULL REFERENCES trainers(id),
        pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
        ability_id INTEGER NOT NULL REFERENCES abilities(id)
    )",
];

/// Open a pool against the database at `database_path`.
///
/// A missing file is a configuration error, not a cue to create an empty
/// store. `":memory:"` is accepted for tests and tools; in-memory databases
/// are per-connection in SQLite, so that pool is capped at one connection.
pub async fn connect(database_path: &str) -> Result<SqlitePool, AppError> {
    let in_memory = database_path == ":memory:";
    if !in_memory && !Path::new(database_path).exists() {
        return Err(AppError::Config(format!(
            "database file '{database_path}' not found"
        )));
    }
    // Foreign keys stay unenforced: cleaning may drop duplicate rows that
    // other tables still reference, and those references are left stale.
    let options = SqliteConnectOptions::from_str(database_path)
        .map_err(|e| AppError::Config(format!("invalid database path '{database_path}': {e}")))?
        .create_if_missing(in_memory)
        .foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .connect_with(options)
        .await?;
    tracing::info!(path = database_path, "connected to database");
    Ok(pool)
}

/// Create any missing tables.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
