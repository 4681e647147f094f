use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::application::ports::{NoteRepository, NoteWriteOutcome, RepositoryError};
use crate::domain::{Note, NoteId, Summary, SummaryId, SummaryType, UserId};

pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct NoteRow {
    id: String,
    user_id: String,
    title: String,
    content: String,
    source: String,
    created_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(r: NoteRow) -> Self {
        Note {
            id: NoteId::from_raw(r.id),
            user_id: UserId::new(r.user_id),
            title: r.title,
            content: r.content,
            source: r.source,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
struct SummaryRow {
    id: String,
    user_id: String,
    note_id: String,
    summary: String,
    summary_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for Summary {
    type Error = RepositoryError;

    fn try_from(r: SummaryRow) -> Result<Self, Self::Error> {
        let summary_type = r
            .summary_type
            .parse::<SummaryType>()
            .map_err(RepositoryError::CorruptRecord)?;

        Ok(Summary {
            id: SummaryId::from_raw(r.id),
            user_id: UserId::new(r.user_id),
            note_id: NoteId::from_raw(r.note_id),
            text: r.summary,
            summary_type,
            created_at: r.created_at,
        })
    }
}

fn tx_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::TransactionFailed(e.to_string())
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    #[instrument(skip(self, note, summary), fields(user_id = %note.user_id, note_id = %note.id, summary_id = %summary.id))]
    async fn save_note_with_summary(
        &self,
        note: &Note,
        summary: &Summary,
    ) -> Result<NoteWriteOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO notes (user_id, id, title, content, source, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, id) DO NOTHING
            "#,
        )
        .bind(note.user_id.as_str())
        .bind(note.id.as_str())
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.source)
        .bind(note.created_at)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await.map_err(tx_error)?;
            return Ok(NoteWriteOutcome::AlreadyExists);
        }

        sqlx::query(
            r#"
            INSERT INTO summaries (user_id, id, note_id, summary, summary_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(summary.user_id.as_str())
        .bind(summary.id.as_str())
        .bind(summary.note_id.as_str())
        .bind(&summary.text)
        .bind(summary.summary_type.as_str())
        .bind(summary.created_at)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(tx_error)?;
        Ok(NoteWriteOutcome::Created)
    }

    #[instrument(skip(self), fields(user_id = %user_id, note_id = %note_id))]
    async fn note_exists(&self, user_id: &UserId, note_id: &NoteId) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM notes WHERE user_id = $1 AND id = $2)",
        )
        .bind(user_id.as_str())
        .bind(note_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(exists)
    }

    #[instrument(skip(self), fields(user_id = %user_id, note_id = %note_id))]
    async fn get_note(
        &self,
        user_id: &UserId,
        note_id: &NoteId,
    ) -> Result<Option<Note>, RepositoryError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, user_id, title, content, source, created_at
            FROM notes
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(note_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(Note::from))
    }

    #[instrument(skip(self), fields(user_id = %user_id, summary_id = %summary_id))]
    async fn get_summary(
        &self,
        user_id: &UserId,
        summary_id: &SummaryId,
    ) -> Result<Option<Summary>, RepositoryError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, user_id, note_id, summary, summary_type, created_at
            FROM summaries
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(summary_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        row.map(Summary::try_from).transpose()
    }

    #[instrument(skip(self), fields(user_id = %user_id, summary_id = %summary_id))]
    async fn delete_summary_cascade(
        &self,
        user_id: &UserId,
        summary_id: &SummaryId,
    ) -> Result<Option<NoteId>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        let note_id: Option<String> = sqlx::query_scalar(
            "DELETE FROM summaries WHERE user_id = $1 AND id = $2 RETURNING note_id",
        )
        .bind(user_id.as_str())
        .bind(summary_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(query_error)?;

        let Some(note_id) = note_id else {
            tx.rollback().await.map_err(tx_error)?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM notes WHERE user_id = $1 AND id = $2")
            .bind(user_id.as_str())
            .bind(&note_id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit().await.map_err(tx_error)?;
        Ok(Some(NoteId::from_raw(note_id)))
    }
}
