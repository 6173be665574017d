//! Cleaning behavior against an in-memory store: purge, correction, casing,
//! dedup, and idempotence.

mod common;

use common::{insert_named, memory_pool};
use pokedex_api::clean;
use sqlx::SqlitePool;

async fn names(pool: &SqlitePool, table: &str) -> Vec<String> {
    let rows: Vec<(String,)> = sqlx::query_as(&format!("SELECT name FROM {table} ORDER BY id"))
        .fetch_all(pool)
        .await
        .unwrap();
    rows.into_iter().map(|(n,)| n).collect()
}

async fn rows(pool: &SqlitePool, table: &str) -> Vec<(i64, String)> {
    sqlx::query_as(&format!("SELECT id, name FROM {table} ORDER BY id"))
        .fetch_all(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn purge_removes_every_dirty_row() {
    let pool = memory_pool().await;
    for dirty in ["Remove this ability", "---", "", "???"] {
        insert_named(&pool, "abilities", dirty).await;
    }
    insert_named(&pool, "abilities", "Blaze").await;

    clean(&pool).await.unwrap();

    assert_eq!(names(&pool, "abilities").await, vec!["Blaze"]);
}

#[tokio::test]
async fn misspelled_pokemon_is_corrected() {
    let pool = memory_pool().await;
    insert_named(&pool, "pokemon", "Pikuchu").await;

    clean(&pool).await.unwrap();

    assert_eq!(names(&pool, "pokemon").await, vec!["Pikachu"]);
}

#[tokio::test]
async fn casing_is_whole_string_not_per_word() {
    let pool = memory_pool().await;
    insert_named(&pool, "trainers", "gary oak").await;
    insert_named(&pool, "trainers", "ash KETCHUM").await;

    clean(&pool).await.unwrap();

    assert_eq!(names(&pool, "trainers").await, vec!["Gary oak", "Ash ketchum"]);
}

#[tokio::test]
async fn dedup_keeps_lowest_id_per_normalized_name() {
    let pool = memory_pool().await;
    let first = insert_named(&pool, "pokemon", "Charmander").await;
    insert_named(&pool, "pokemon", "charmander").await;
    insert_named(&pool, "pokemon", "  Charmander  ").await;

    clean(&pool).await.unwrap();

    assert_eq!(rows(&pool, "pokemon").await, vec![(first, "Charmander".to_string())]);
}

#[tokio::test]
async fn correction_and_casing_collapse_into_existing_row() {
    let pool = memory_pool().await;
    let first = insert_named(&pool, "types", "Fire").await;
    insert_named(&pool, "types", "fir").await;
    insert_named(&pool, "types", "FIRE").await;

    clean(&pool).await.unwrap();

    assert_eq!(rows(&pool, "types").await, vec![(first, "Fire".to_string())]);
}

#[tokio::test]
async fn no_two_rows_share_a_trimmed_name_after_cleaning() {
    let pool = memory_pool().await;
    for name in ["gras", "Grass", "grass", "Water", "water "] {
        insert_named(&pool, "types", name).await;
    }

    clean(&pool).await.unwrap();

    let remaining = names(&pool, "types").await;
    let mut deduped = remaining.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(remaining.len(), deduped.len());
    assert!(remaining.contains(&"Grass".to_string()));
    assert!(remaining.contains(&"Water".to_string()));
}

#[tokio::test]
async fn second_run_changes_nothing() {
    let pool = memory_pool().await;
    insert_named(&pool, "pokemon", "Pikuchu").await;
    insert_named(&pool, "pokemon", "charmander").await;
    insert_named(&pool, "pokemon", "Charmanderr").await;
    insert_named(&pool, "types", "eletric").await;
    insert_named(&pool, "trainers", "Professor oak").await;
    insert_named(&pool, "abilities", "???").await;

    clean(&pool).await.unwrap();
    let mut snapshot = Vec::new();
    for table in ["pokemon", "types", "abilities", "trainers"] {
        snapshot.push(rows(&pool, table).await);
    }

    clean(&pool).await.unwrap();
    for (i, table) in ["pokemon", "types", "abilities", "trainers"].into_iter().enumerate() {
        assert_eq!(rows(&pool, table).await, snapshot[i], "table {table} changed on second run");
    }
}
