//! Database initialization tests
//!
//! Covers first-run creation, reopening an existing file, the in-memory
//! pool used by the API tests, and migration bookkeeping.

use flashdeck_common::db::{
    get_schema_version, init_database, init_memory_database, run_migrations,
    CURRENT_SCHEMA_VERSION,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("flashdeck.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());

    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("flashdeck.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query(
        "INSERT INTO flashcards (id, front, back, tags, point, created_at, updated_at)
         VALUES ('a', 'Q', 'A', '[]', 3, '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    // Reopening keeps existing rows
    let pool = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flashcards")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_schema_version_current_after_init() {
    let pool = init_memory_database().await.unwrap();

    let version = get_schema_version(&pool).await.unwrap();
    assert_eq!(version, CURRENT_SCHEMA_VERSION);
}

#[tokio::test]
async fn test_migrations_idempotent() {
    let pool = init_memory_database().await.unwrap();

    run_migrations(&pool).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, CURRENT_SCHEMA_VERSION as i64);
}

#[tokio::test]
async fn test_point_indexes_created() {
    let pool = init_memory_database().await.unwrap();

    let indexes: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'flashcards' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(indexes.contains(&"idx_flashcards_point".to_string()));
    assert!(indexes.contains(&"idx_flashcards_created_at".to_string()));
}

#[tokio::test]
async fn test_negative_point_rejected_by_schema() {
    let pool = init_memory_database().await.unwrap();

    let result = sqlx::query(
        "INSERT INTO flashcards (id, front, back, tags, point, created_at, updated_at)
         VALUES ('b', 'Q', 'A', '[]', -1, '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "CHECK (point >= 0) should reject negative points");
}

#[tokio::test]
async fn test_database_path_with_url_characters() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("decks #1 (100%)?").join("flash?deck#.db");

    let pool = init_database(&db_path).await.unwrap();
    assert!(db_path.exists(), "Database not created at the literal path");

    let version = get_schema_version(&pool).await.unwrap();
    assert_eq!(version, CURRENT_SCHEMA_VERSION);
}

#[tokio::test]
async fn test_file_database_uses_wal() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("flashdeck.db")).await.unwrap();

    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}
