//! One-shot batch cleaning of the dataset: purge junk rows, correct
//! misspellings and casing, collapse duplicates.

use crate::error::AppError;
use sqlx::SqlitePool;

/// Tables cleaned, in this order.
const TABLES: [&str; 4] = ["pokemon", "types", "abilities", "trainers"];

/// Names that mark a row as junk. Matched exactly, before any normalization,
/// so a junk row never survives as the "original" of a valid duplicate.
const DIRTY_NAMES: [&str; 4] = ["Remove this ability", "---", "", "???"];

/// Exact-match corrections applied to trimmed names.
const CORRECTIONS: [(&str, &str); 9] = [
    ("Pikuchu", "Pikachu"),
    ("gras", "Grass"),
    ("fir", "Fire"),
    ("eletric", "Electric"),
    ("Charmanderr", "Charmander"),
    ("Gary oak", "Gary Oak"),
    ("Ash ketchum", "Ash Ketchum"),
    ("Professor oak", "Professor Oak"),
    ("Poision", "Poison"),
];

/// Uppercase the first character, lowercase the entire remainder. Applies to
/// the whole string, not per word: "gary oak" becomes "Gary oak".
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Trim, apply the correction map, then re-case.
pub(crate) fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    let corrected = CORRECTIONS
        .iter()
        .find(|(key, _)| *key == trimmed)
        .map(|(_, value)| *value)
        .unwrap_or(trimmed);
    capitalize(corrected)
}

/// Clean all four tables inside one transaction. Per table: delete rows with
/// junk names, rewrite every remaining name through [`normalize_name`], then
/// keep only the lowest-id row per trimmed name. Any store error rolls the
/// whole run back; the routine stays callable afterwards.
///
/// Rows in other tables that referenced a deleted duplicate keep their stale
/// id. That loss is accepted, not repaired.
pub async fn clean(pool: &SqlitePool) -> Result<(), AppError> {
    tracing::info!("starting database cleaning");
    let mut tx = pool.begin().await?;

    // Table names come from the fixed list above, never from input.
    for table in TABLES {
        for dirty in DIRTY_NAMES {
            sqlx::query(&format!("DELETE FROM {table} WHERE name = ?"))
                .bind(dirty)
                .execute(&mut *tx)
                .await?;
        }

        let rows: Vec<(i64, String)> = sqlx::query_as(&format!("SELECT id, name FROM {table}"))
            .fetch_all(&mut *tx)
            .await?;
        for (id, name) in rows {
            let cleaned = normalize_name(&name);
            if cleaned != name {
                sqlx::query(&format!("UPDATE {table} SET name = ? WHERE id = ?"))
                    .bind(&cleaned)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        sqlx::query(&format!(
            "DELETE FROM {table} WHERE id NOT IN (SELECT MIN(id) FROM {table} GROUP BY TRIM(name))"
        ))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!("database cleaning finished");
    Ok(())
}
