use async_trait::async_trait;

use crate::domain::{Note, NoteId, Summary, SummaryId, UserId};

use super::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteWriteOutcome {
    Created,
    /// A note with the same id was already stored; nothing was written.
    AlreadyExists,
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Writes the note and its summary in one atomic batch, or nothing at all
    /// when the note id is taken.
    async fn save_note_with_summary(
        &self,
        note: &Note,
        summary: &Summary,
    ) -> Result<NoteWriteOutcome, RepositoryError>;

    async fn note_exists(&self, user_id: &UserId, note_id: &NoteId)
    -> Result<bool, RepositoryError>;

    async fn get_note(
        &self,
        user_id: &UserId,
        note_id: &NoteId,
    ) -> Result<Option<Note>, RepositoryError>;

    async fn get_summary(
        &self,
        user_id: &UserId,
        summary_id: &SummaryId,
    ) -> Result<Option<Summary>, RepositoryError>;

    /// Deletes the summary and the note it points at together. Returns the
    /// note id, or `None` when the summary does not exist.
    async fn delete_summary_cascade(
        &self,
        user_id: &UserId,
        summary_id: &SummaryId,
    ) -> Result<Option<NoteId>, RepositoryError>;
}
