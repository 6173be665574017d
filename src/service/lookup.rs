//! Read-only relation lookups. Each returns the related entity names, or
//! `NotFound` when either the key entity or its relations are absent. The two
//! absence cases are logged distinctly but surface the same to callers.

use crate::error::AppError;
use sqlx::SqlitePool;

pub struct LookupService;

impl LookupService {
    /// Pokémon holding the ability, matched case-insensitively.
    pub async fn pokemon_by_ability(pool: &SqlitePool, name: &str) -> Result<Vec<String>, AppError> {
        let ability: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM abilities WHERE LOWER(name) = LOWER(?)")
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if ability.is_none() {
            tracing::debug!(ability = name, "lookup key missing");
            return Err(AppError::NotFound("Ability not found".into()));
        }

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT pokemon.name FROM pokemon \
             JOIN pokemon_abilities ON pokemon.id = pokemon_abilities.pokemon_id \
             JOIN abilities ON pokemon_abilities.ability_id = abilities.id \
             WHERE LOWER(abilities.name) = LOWER(?)",
        )
        .bind(name)
        .fetch_all(pool)
        .await?;
        if rows.is_empty() {
            tracing::debug!(ability = name, "lookup key has no related rows");
            return Err(AppError::NotFound("No Pokemon found with this ability".into()));
        }
        Ok(rows.into_iter().map(|(n,)| n).collect())
    }

    /// Pokémon of the type, matched case-sensitively against either slot.
    pub async fn pokemon_by_type(pool: &SqlitePool, name: &str) -> Result<Vec<String>, AppError> {
        let kind: Option<(i64,)> = sqlx::query_as("SELECT id FROM types WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        if kind.is_none() {
            tracing::debug!(type_name = name, "lookup key missing");
            return Err(AppError::NotFound("Type not found".into()));
        }

        // LEFT JOIN keeps single-typed Pokémon with an empty second slot.
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT p.name FROM pokemon p \
             LEFT JOIN types t1 ON p.type1_id = t1.id \
             LEFT JOIN types t2 ON p.type2_id = t2.id \
             WHERE t1.name = ? OR t2.name = ?",
        )
        .bind(name)
        .bind(name)
        .fetch_all(pool)
        .await?;
        if rows.is_empty() {
            tracing::debug!(type_name = name, "lookup key has no related rows");
            return Err(AppError::NotFound("No Pokemon found with this type".into()));
        }
        Ok(rows.into_iter().map(|(n,)| n).collect())
    }

    /// Trainers holding the Pokémon, through the ternary association.
    pub async fn trainers_by_pokemon(pool: &SqlitePool, name: &str) -> Result<Vec<String>, AppError> {
        Self::require_pokemon(pool, name).await?;

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT trainers.name FROM trainers \
             JOIN trainer_pokemon_abilities tpa ON trainers.id = tpa.trainer_id \
             JOIN pokemon ON tpa.pokemon_id = pokemon.id \
             WHERE LOWER(pokemon.name) = LOWER(?)",
        )
        .bind(name)
        .fetch_all(pool)
        .await?;
        if rows.is_empty() {
            tracing::debug!(pokemon = name, "lookup key has no related rows");
            return Err(AppError::NotFound("No trainers found with this Pokemon".into()));
        }
        Ok(rows.into_iter().map(|(n,)| n).collect())
    }

    /// Abilities of the Pokémon, matched case-insensitively.
    pub async fn abilities_by_pokemon(pool: &SqlitePool, name: &str) -> Result<Vec<String>, AppError> {
        Self::require_pokemon(pool, name).await?;

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT a.name FROM abilities a \
             JOIN pokemon_abilities pa ON a.id = pa.ability_id \
             JOIN pokemon p ON pa.pokemon_id = p.id \
             WHERE LOWER(p.name) = LOWER(?)",
        )
        .bind(name)
        .fetch_all(pool)
        .await?;
        if rows.is_empty() {
            tracing::debug!(pokemon = name, "lookup key has no related rows");
            return Err(AppError::NotFound("No abilities found for this Pokemon".into()));
        }
        Ok(rows.into_iter().map(|(n,)| n).collect())
    }

    async fn require_pokemon(pool: &SqlitePool, name: &str) -> Result<(), AppError> {
        let pokemon: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM pokemon WHERE LOWER(name) = LOWER(?)")
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if pokemon.is_none() {
            tracing::debug!(pokemon = name, "lookup key missing");
            return Err(AppError::NotFound("Pokemon not found".into()));
        }
        Ok(())
    }
}
