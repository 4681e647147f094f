use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{NoteRepository, NoteWriteOutcome, RepositoryError};
use crate::domain::{Note, NoteId, Summary, SummaryId, UserId};

type Key = (String, String);

#[derive(Default)]
struct Store {
    notes: HashMap<Key, Note>,
    summaries: HashMap<Key, Summary>,
}

/// Process-local store with the same atomicity as the Postgres one: both
/// maps are guarded by one lock.
#[derive(Default)]
pub struct InMemoryNoteRepository {
    store: RwLock<Store>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(user_id: &UserId, id: &str) -> Key {
    (user_id.as_str().to_string(), id.to_string())
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn save_note_with_summary(
        &self,
        note: &Note,
        summary: &Summary,
    ) -> Result<NoteWriteOutcome, RepositoryError> {
        let mut store = self.store.write().await;
        let note_key = key(&note.user_id, note.id.as_str());
        if store.notes.contains_key(&note_key) {
            return Ok(NoteWriteOutcome::AlreadyExists);
        }

        store.notes.insert(note_key, note.clone());
        store
            .summaries
            .insert(key(&summary.user_id, summary.id.as_str()), summary.clone());
        Ok(NoteWriteOutcome::Created)
    }

    async fn note_exists(&self, user_id: &UserId, note_id: &NoteId) -> Result<bool, RepositoryError> {
        Ok(self
            .store
            .read()
            .await
            .notes
            .contains_key(&key(user_id, note_id.as_str())))
    }

    async fn get_note(
        &self,
        user_id: &UserId,
        note_id: &NoteId,
    ) -> Result<Option<Note>, RepositoryError> {
        Ok(self
            .store
            .read()
            .await
            .notes
            .get(&key(user_id, note_id.as_str()))
            .cloned())
    }

    async fn get_summary(
        &self,
        user_id: &UserId,
        summary_id: &SummaryId,
    ) -> Result<Option<Summary>, RepositoryError> {
        Ok(self
            .store
            .read()
            .await
            .summaries
            .get(&key(user_id, summary_id.as_str()))
            .cloned())
    }

    async fn delete_summary_cascade(
        &self,
        user_id: &UserId,
        summary_id: &SummaryId,
    ) -> Result<Option<NoteId>, RepositoryError> {
        let mut store = self.store.write().await;
        let Some(summary) = store.summaries.remove(&key(user_id, summary_id.as_str())) else {
            return Ok(None);
        };

        store.notes.remove(&key(user_id, summary.note_id.as_str()));
        Ok(Some(summary.note_id))
    }
}
