//! Flashcard queries
//!
//! Point changes happen inside a single `UPDATE` so two ratings of the
//! same card arriving together both land.

use chrono::Utc;
use flashdeck_common::api::StatsResponse;
use flashdeck_common::db::{Flashcard, FlashcardRow, NewFlashcard};
use flashdeck_common::{Bucket, Difficulty, Error, Result, MASTERY_THRESHOLD};
use sqlx::types::Json;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

const COLUMNS: &str = "id, front, back, hint, tags, point, created_at, updated_at";

fn not_found(id: &str) -> Error {
    Error::CardNotFound(id.to_string())
}

/// All cards, oldest first
pub async fn list_flashcards(pool: &SqlitePool) -> Result<Vec<Flashcard>> {
    let rows = sqlx::query_as::<_, FlashcardRow>(&format!(
        "SELECT {} FROM flashcards ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    debug!("Fetched {} flashcards", rows.len());
    Ok(rows.into_iter().map(Flashcard::from).collect())
}

/// Cards whose tag list contains `tag` exactly
pub async fn list_by_tag(pool: &SqlitePool, tag: &str) -> Result<Vec<Flashcard>> {
    let rows = sqlx::query_as::<_, FlashcardRow>(&format!(
        "SELECT {} FROM flashcards
         WHERE EXISTS (SELECT 1 FROM json_each(flashcards.tags) WHERE json_each.value = ?)
         ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .bind(tag)
    .fetch_all(pool)
    .await?;

    debug!("Fetched {} flashcards tagged '{}'", rows.len(), tag);
    Ok(rows.into_iter().map(Flashcard::from).collect())
}

/// Cards in the practice or mastered bucket
pub async fn list_by_bucket(pool: &SqlitePool, bucket: Bucket) -> Result<Vec<Flashcard>> {
    let predicate = match bucket {
        Bucket::Practice => "point < ?",
        Bucket::Mastered => "point >= ?",
    };
    let rows = sqlx::query_as::<_, FlashcardRow>(&format!(
        "SELECT {} FROM flashcards WHERE {} ORDER BY created_at ASC, rowid ASC",
        COLUMNS, predicate
    ))
    .bind(MASTERY_THRESHOLD)
    .fetch_all(pool)
    .await?;

    debug!("Fetched {} flashcards in {:?} bucket", rows.len(), bucket);
    Ok(rows.into_iter().map(Flashcard::from).collect())
}

pub async fn get_flashcard(pool: &SqlitePool, id: &str) -> Result<Flashcard> {
    sqlx::query_as::<_, FlashcardRow>(&format!("SELECT {} FROM flashcards WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Flashcard::from)
        .ok_or_else(|| not_found(id))
}

/// Insert a new card with a fresh UUID and zero points
pub async fn insert_flashcard(pool: &SqlitePool, card: NewFlashcard) -> Result<Flashcard> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO flashcards (id, front, back, hint, tags, point, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(&id)
    .bind(&card.front)
    .bind(&card.back)
    .bind(&card.hint)
    .bind(Json(&card.tags))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Flashcard {
        id,
        front: card.front,
        back: card.back,
        hint: card.hint,
        tags: card.tags,
        point: 0,
        created_at: now,
        updated_at: now,
    })
}

/// Replace the editable fields of a card; points are left alone
pub async fn update_flashcard(pool: &SqlitePool, id: &str, card: NewFlashcard) -> Result<Flashcard> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE flashcards SET front = ?, back = ?, hint = ?, tags = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&card.front)
    .bind(&card.back)
    .bind(&card.hint)
    .bind(Json(&card.tags))
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    let updated = fetch_in_tx(&mut tx, id).await?;
    tx.commit().await?;
    Ok(updated)
}

/// Apply a difficulty rating to a card's points
pub async fn apply_rating(pool: &SqlitePool, id: &str, difficulty: Difficulty) -> Result<Flashcard> {
    let mut tx = pool.begin().await?;

    let query = match difficulty.increment() {
        None => sqlx::query("UPDATE flashcards SET point = 0, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id),
        // Saturate instead of letting SQLite promote the sum to REAL
        Some(delta) => sqlx::query(
            "UPDATE flashcards
             SET point = CASE WHEN point > ? THEN ? ELSE point + ? END, updated_at = ?
             WHERE id = ?",
        )
        .bind(i64::MAX - delta)
        .bind(i64::MAX)
        .bind(delta)
        .bind(Utc::now())
        .bind(id),
    };

    let result = query.execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    let updated = fetch_in_tx(&mut tx, id).await?;
    tx.commit().await?;
    Ok(updated)
}

pub async fn delete_flashcard(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM flashcards WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

/// Card totals per bucket
pub async fn count_stats(pool: &SqlitePool) -> Result<StatsResponse> {
    let (total_cards, practice_cards): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN point < ? THEN 1 ELSE 0 END), 0)
         FROM flashcards",
    )
    .bind(MASTERY_THRESHOLD)
    .fetch_one(pool)
    .await?;

    Ok(StatsResponse {
        total_cards,
        practice_cards,
        mastered_cards: total_cards - practice_cards,
    })
}

async fn fetch_in_tx(tx: &mut Transaction<'_, Sqlite>, id: &str) -> Result<Flashcard> {
    sqlx::query_as::<_, FlashcardRow>(&format!("SELECT {} FROM flashcards WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .map(Flashcard::from)
        .ok_or_else(|| not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_common::db::init_memory_database;

    fn card(front: &str, tags: &[&str]) -> NewFlashcard {
        NewFlashcard {
            front: front.to_string(),
            back: "answer".to_string(),
            hint: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let pool = init_memory_database().await.unwrap();

        let created = insert_flashcard(&pool, card("Q1", &["geo"])).await.unwrap();
        assert_eq!(created.point, 0);
        assert!(Uuid::parse_str(&created.id).is_ok());

        let fetched = get_flashcard(&pool, &created.id).await.unwrap();
        assert_eq!(fetched.front, "Q1");
        assert_eq!(fetched.tags, vec!["geo"]);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let pool = init_memory_database().await.unwrap();
        for front in ["first", "second", "third"] {
            insert_flashcard(&pool, card(front, &[])).await.unwrap();
        }

        let fronts: Vec<String> = list_flashcards(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.front)
            .collect();
        assert_eq!(fronts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_tag_match_is_exact() {
        let pool = init_memory_database().await.unwrap();
        insert_flashcard(&pool, card("a", &["geography", "capital"])).await.unwrap();
        insert_flashcard(&pool, card("b", &["geo"])).await.unwrap();
        insert_flashcard(&pool, card("c", &[])).await.unwrap();

        let geo = list_by_tag(&pool, "geo").await.unwrap();
        assert_eq!(geo.len(), 1);
        assert_eq!(geo[0].front, "b");

        let capital = list_by_tag(&pool, "capital").await.unwrap();
        assert_eq!(capital.len(), 1);
        assert_eq!(capital[0].front, "a");

        assert!(list_by_tag(&pool, "missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rating_moves_card_between_buckets() {
        let pool = init_memory_database().await.unwrap();
        let id = insert_flashcard(&pool, card("Q", &[])).await.unwrap().id;

        let after = apply_rating(&pool, &id, Difficulty::Easy).await.unwrap();
        assert_eq!(after.point, 2);
        let after = apply_rating(&pool, &id, Difficulty::Easy).await.unwrap();
        assert_eq!(after.point, 4);
        assert_eq!(list_by_bucket(&pool, Bucket::Practice).await.unwrap().len(), 1);

        let after = apply_rating(&pool, &id, Difficulty::Hard).await.unwrap();
        assert_eq!(after.point, 5);
        assert_eq!(after.bucket(), Bucket::Mastered);
        assert!(list_by_bucket(&pool, Bucket::Practice).await.unwrap().is_empty());
        assert_eq!(list_by_bucket(&pool, Bucket::Mastered).await.unwrap().len(), 1);

        let after = apply_rating(&pool, &id, Difficulty::Wrong).await.unwrap();
        assert_eq!(after.point, 0);
        assert_eq!(after.bucket(), Bucket::Practice);
    }

    #[tokio::test]
    async fn test_rating_saturates_at_max() {
        let pool = init_memory_database().await.unwrap();
        let id = insert_flashcard(&pool, card("Q", &[])).await.unwrap().id;
        sqlx::query("UPDATE flashcards SET point = ? WHERE id = ?")
            .bind(i64::MAX - 1)
            .bind(&id)
            .execute(&pool)
            .await
            .unwrap();

        let after = apply_rating(&pool, &id, Difficulty::Easy).await.unwrap();
        assert_eq!(after.point, i64::MAX);
    }

    #[tokio::test]
    async fn test_missing_card_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let id = "00000000-0000-0000-0000-000000000000";

        assert!(matches!(get_flashcard(&pool, id).await, Err(Error::CardNotFound(_))));
        assert!(matches!(
            apply_rating(&pool, id, Difficulty::Hard).await,
            Err(Error::CardNotFound(_))
        ));
        assert!(matches!(delete_flashcard(&pool, id).await, Err(Error::CardNotFound(_))));
        assert!(matches!(
            update_flashcard(&pool, id, card("Q", &[])).await,
            Err(Error::CardNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_points() {
        let pool = init_memory_database().await.unwrap();
        let id = insert_flashcard(&pool, card("old", &["x"])).await.unwrap().id;
        apply_rating(&pool, &id, Difficulty::Hard).await.unwrap();

        let updated = update_flashcard(&pool, &id, card("new", &["y"])).await.unwrap();
        assert_eq!(updated.front, "new");
        assert_eq!(updated.tags, vec!["y"]);
        assert_eq!(updated.point, 1);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_stats() {
        let pool = init_memory_database().await.unwrap();
        assert_eq!(count_stats(&pool).await.unwrap(), StatsResponse::default());

        let a = insert_flashcard(&pool, card("a", &[])).await.unwrap().id;
        insert_flashcard(&pool, card("b", &[])).await.unwrap();
        for _ in 0..3 {
            apply_rating(&pool, &a, Difficulty::Easy).await.unwrap();
        }

        let stats = count_stats(&pool).await.unwrap();
        assert_eq!(stats.total_cards, 2);
        assert_eq!(stats.practice_cards, 1);
        assert_eq!(stats.mastered_cards, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = init_memory_database().await.unwrap();
        let id = insert_flashcard(&pool, card("gone", &[])).await.unwrap().id;

        delete_flashcard(&pool, &id).await.unwrap();
        assert!(list_flashcards(&pool).await.unwrap().is_empty());
    }
}
