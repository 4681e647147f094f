use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::application::ports::{FlashcardSetRepository, RepositoryError};
use crate::domain::{Flashcard, FlashcardSet, FlashcardSetId, FlashcardSetOverview, UserId};

pub struct PgFlashcardSetRepository {
    pool: PgPool,
}

impl PgFlashcardSetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FlashcardSetRow {
    id: String,
    user_id: String,
    name: String,
    note_id: Option<String>,
    note_title: Option<String>,
    flashcards: Json<Vec<Flashcard>>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct OverviewRow {
    id: String,
    name: String,
    note_id: Option<String>,
    note_title: Option<String>,
    flashcard_count: i32,
    created_at: DateTime<Utc>,
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

#[async_trait]
impl FlashcardSetRepository for PgFlashcardSetRepository {
    #[instrument(skip(self, set), fields(user_id = %set.user_id, set_id = %set.id))]
    async fn create(&self, set: &FlashcardSet) -> Result<bool, RepositoryError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO flashcard_sets (user_id, id, name, note_id, note_title, flashcards, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, id) DO NOTHING
            "#,
        )
        .bind(set.user_id.as_str())
        .bind(set.id.as_str())
        .bind(&set.name)
        .bind(&set.note_id)
        .bind(&set.note_title)
        .bind(Json(&set.flashcards))
        .bind(set.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?
        .rows_affected();

        Ok(inserted > 0)
    }

    #[instrument(skip(self), fields(user_id = %user_id, set_id = %set_id))]
    async fn get(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<Option<FlashcardSet>, RepositoryError> {
        let row = sqlx::query_as::<_, FlashcardSetRow>(
            r#"
            SELECT id, user_id, name, note_id, note_title, flashcards, created_at
            FROM flashcard_sets
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(set_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(|r| FlashcardSet {
            id: FlashcardSetId::from_raw(r.id),
            user_id: UserId::new(r.user_id),
            name: r.name,
            note_id: r.note_id,
            note_title: r.note_title,
            flashcards: r.flashcards.0,
            created_at: r.created_at,
        }))
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FlashcardSetOverview>, RepositoryError> {
        let rows = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT id, name, note_id, note_title,
                   jsonb_array_length(flashcards) AS flashcard_count, created_at
            FROM flashcard_sets
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(|r| FlashcardSetOverview {
                id: FlashcardSetId::from_raw(r.id),
                name: r.name,
                note_id: r.note_id,
                note_title: r.note_title,
                flashcard_count: r.flashcard_count.max(0) as usize,
                created_at: r.created_at,
            })
            .collect())
    }

    #[instrument(skip(self, flashcards), fields(user_id = %user_id, set_id = %set_id, cards = flashcards.len()))]
    async fn replace_flashcards(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
        flashcards: &[Flashcard],
    ) -> Result<bool, RepositoryError> {
        let updated = sqlx::query(
            "UPDATE flashcard_sets SET flashcards = $3 WHERE user_id = $1 AND id = $2",
        )
        .bind(user_id.as_str())
        .bind(set_id.as_str())
        .bind(Json(flashcards))
        .execute(&self.pool)
        .await
        .map_err(query_error)?
        .rows_affected();

        Ok(updated > 0)
    }

    #[instrument(skip(self), fields(user_id = %user_id, set_id = %set_id))]
    async fn delete(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM flashcard_sets WHERE user_id = $1 AND id = $2")
            .bind(user_id.as_str())
            .bind(set_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_error)?
            .rows_affected();

        Ok(deleted > 0)
    }
}
