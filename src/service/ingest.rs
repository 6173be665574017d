//! Reconciling an external Pokémon record into the store.

use crate::error::AppError;
use crate::pokeapi::PokemonSource;
use sqlx::{SqliteConnection, SqlitePool};

/// Tables reachable through resolve-or-insert. SQL identifiers stay
/// compile-time constants.
#[derive(Debug, Clone, Copy)]
pub enum EntityKind {
    Type,
    Ability,
    Trainer,
}

impl EntityKind {
    fn table(self) -> &'static str {
        match self {
            EntityKind::Type => "types",
            EntityKind::Ability => "abilities",
            EntityKind::Trainer => "trainers",
        }
    }
}

/// Picks the trainer assigned to a newly ingested Pokémon/ability pair.
pub trait TrainerSelector: Send + Sync {
    /// Returns one of the given ids, or `None` when the slice is empty.
    fn choose(&self, trainer_ids: &[i64]) -> Option<i64>;
}

/// Uniform random pick over all existing trainers.
pub struct RandomTrainerSelector;

impl TrainerSelector for RandomTrainerSelector {
    fn choose(&self, trainer_ids: &[i64]) -> Option<i64> {
        use rand::seq::SliceRandom;
        trainer_ids.choose(&mut rand::thread_rng()).copied()
    }
}

/// Per-word title case: first letter of every word uppercased, the rest
/// lowercased, with any non-alphabetic character starting a new word.
/// Insert-time convention only; the cleaner re-cases whole strings instead.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

pub struct IngestService;

impl IngestService {
    /// Fetch `name` from the external source and reconcile the record into
    /// the store. All writes run in one transaction, rolled back wholesale on
    /// any store error. Re-ingesting the same name returns the same Pokémon
    /// id without duplicating rows, except for the ternary trainer
    /// association, which is appended per call (assignment is random each
    /// time).
    pub async fn ingest(
        pool: &SqlitePool,
        source: &dyn PokemonSource,
        selector: &dyn TrainerSelector,
        name: &str,
    ) -> Result<i64, AppError> {
        let record = source.fetch(name).await?;

        let mut tx = pool.begin().await?;

        let (first, second) = record.type_names();
        let type1_id = match first {
            Some(type_name) => Some(Self::get_or_create(&mut tx, EntityKind::Type, type_name).await?),
            None => None,
        };
        let type2_id = match second {
            Some(type_name) => Some(Self::get_or_create(&mut tx, EntityKind::Type, type_name).await?),
            None => None,
        };

        let display_name = title_case(&record.name);
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM pokemon WHERE LOWER(name) = LOWER(?)")
                .bind(&display_name)
                .fetch_optional(&mut *tx)
                .await?;
        let pokemon_id = match existing {
            Some((id,)) => {
                // The latest external record wins both slots, including
                // clearing a second type the record no longer declares.
                sqlx::query("UPDATE pokemon SET type1_id = ?, type2_id = ? WHERE id = ?")
                    .bind(type1_id)
                    .bind(type2_id)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
            None => {
                let result =
                    sqlx::query("INSERT INTO pokemon (name, type1_id, type2_id) VALUES (?, ?, ?)")
                        .bind(&display_name)
                        .bind(type1_id)
                        .bind(type2_id)
                        .execute(&mut *tx)
                        .await?;
                result.last_insert_rowid()
            }
        };

        for ability_name in record.ability_names() {
            let ability_id = Self::get_or_create(&mut tx, EntityKind::Ability, ability_name).await?;
            sqlx::query(
                "INSERT OR IGNORE INTO pokemon_abilities (pokemon_id, ability_id) VALUES (?, ?)",
            )
            .bind(pokemon_id)
            .bind(ability_id)
            .execute(&mut *tx)
            .await?;

            let trainer_rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM trainers")
                .fetch_all(&mut *tx)
                .await?;
            let trainer_ids: Vec<i64> = trainer_rows.into_iter().map(|(id,)| id).collect();
            let trainer_id = match selector.choose(&trainer_ids) {
                Some(id) => id,
                None => Self::get_or_create(&mut tx, EntityKind::Trainer, "Default Trainer").await?,
            };

            // Not deduplicated: each call appends a fresh assignment row.
            sqlx::query(
                "INSERT INTO trainer_pokemon_abilities (trainer_id, pokemon_id, ability_id) \
                 VALUES (?, ?, ?)",
            )
            .bind(trainer_id)
            .bind(pokemon_id)
            .bind(ability_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!(pokemon = %display_name, id = pokemon_id, "ingested external record");
        Ok(pokemon_id)
    }

    /// Resolve an entity id by case-insensitive name, inserting a title-cased
    /// row when absent.
    async fn get_or_create(
        conn: &mut SqliteConnection,
        kind: EntityKind,
        name: &str,
    ) -> Result<i64, AppError> {
        let existing: Option<(i64,)> = sqlx::query_as(&format!(
            "SELECT id FROM {} WHERE LOWER(name) = LOWER(?)",
            kind.table()
        ))
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
        if let Some((id,)) = existing {
            return Ok(id);
        }
        let result = sqlx::query(&format!("INSERT INTO {} (name) VALUES (?)", kind.table()))
            .bind(title_case(name))
            .execute(&mut *conn)
            .await?;
        Ok(result.last_insert_rowid())
    }
}
