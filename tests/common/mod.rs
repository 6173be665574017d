//! Shared test fixtures: in-memory store with the production schema, seed
//! helpers, a canned external source, and a fixed trainer selector.
#![allow(dead_code)]

use async_trait::async_trait;
use pokedex_api::pokeapi::{AbilitySlot, NamedResource, PokemonRecord, PokemonSource, TypeSlot};
use pokedex_api::{ensure_schema, AppError, TrainerSelector};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fresh in-memory database with all tables created.
pub async fn memory_pool() -> SqlitePool {
    let pool = pokedex_api::connect(":memory:").await.expect("in-memory pool");
    ensure_schema(&pool).await.expect("schema");
    pool
}

pub async fn insert_named(pool: &SqlitePool, table: &str, name: &str) -> i64 {
    sqlx::query(&format!("INSERT INTO {table} (name) VALUES (?)"))
        .bind(name)
        .execute(pool)
        .await
        .expect("insert")
        .last_insert_rowid()
}

pub async fn insert_pokemon(
    pool: &SqlitePool,
    name: &str,
    type1_id: Option<i64>,
    type2_id: Option<i64>,
) -> i64 {
    sqlx::query("INSERT INTO pokemon (name, type1_id, type2_id) VALUES (?, ?, ?)")
        .bind(name)
        .bind(type1_id)
        .bind(type2_id)
        .execute(pool)
        .await
        .expect("insert pokemon")
        .last_insert_rowid()
}

pub async fn link_ability(pool: &SqlitePool, pokemon_id: i64, ability_id: i64) {
    sqlx::query("INSERT INTO pokemon_abilities (pokemon_id, ability_id) VALUES (?, ?)")
        .bind(pokemon_id)
        .bind(ability_id)
        .execute(pool)
        .await
        .expect("link ability");
}

pub async fn link_assignment(pool: &SqlitePool, trainer_id: i64, pokemon_id: i64, ability_id: i64) {
    sqlx::query(
        "INSERT INTO trainer_pokemon_abilities (trainer_id, pokemon_id, ability_id) VALUES (?, ?, ?)",
    )
    .bind(trainer_id)
    .bind(pokemon_id)
    .bind(ability_id)
    .execute(pool)
    .await
    .expect("link assignment");
}

pub async fn count(pool: &SqlitePool, sql: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(sql).fetch_one(pool).await.expect("count");
    n
}

/// Build an external record the way the upstream API shapes one.
pub fn record(name: &str, types: &[&str], abilities: &[&str]) -> PokemonRecord {
    PokemonRecord {
        name: name.to_string(),
        types: types
            .iter()
            .map(|t| TypeSlot {
                kind: NamedResource { name: t.to_string() },
            })
            .collect(),
        abilities: abilities
            .iter()
            .map(|a| AbilitySlot {
                ability: NamedResource { name: a.to_string() },
            })
            .collect(),
    }
}

/// Canned external source keyed by lower-cased name. Records can be replaced
/// between calls to simulate upstream data changing.
pub struct StubSource {
    records: Mutex<HashMap<String, PokemonRecord>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn set(&self, record: PokemonRecord) {
        let key = record.name.to_lowercase();
        self.records.lock().unwrap().insert(key, record);
    }
}

#[async_trait]
impl PokemonSource for StubSource {
    async fn fetch(&self, name: &str) -> Result<PokemonRecord, AppError> {
        self.records
            .lock()
            .unwrap()
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Pokemon '{name}' not found in external source"))
            })
    }
}

/// Always picks the lowest trainer id. Keeps ingestion tests deterministic.
pub struct PickFirst;

impl TrainerSelector for PickFirst {
    fn choose(&self, trainer_ids: &[i64]) -> Option<i64> {
        trainer_ids.first().copied()
    }
}
