use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{FlashcardSetRepository, RepositoryError};
use crate::domain::{Flashcard, FlashcardSet, FlashcardSetId, FlashcardSetOverview, UserId};

#[derive(Default)]
pub struct InMemoryFlashcardSetRepository {
    sets: RwLock<HashMap<(String, String), FlashcardSet>>,
}

impl InMemoryFlashcardSetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(user_id: &UserId, set_id: &FlashcardSetId) -> (String, String) {
    (user_id.as_str().to_string(), set_id.as_str().to_string())
}

#[async_trait]
impl FlashcardSetRepository for InMemoryFlashcardSetRepository {
    async fn create(&self, set: &FlashcardSet) -> Result<bool, RepositoryError> {
        let mut sets = self.sets.write().await;
        let set_key = key(&set.user_id, &set.id);
        if sets.contains_key(&set_key) {
            return Ok(false);
        }
        sets.insert(set_key, set.clone());
        Ok(true)
    }

    async fn get(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<Option<FlashcardSet>, RepositoryError> {
        Ok(self.sets.read().await.get(&key(user_id, set_id)).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FlashcardSetOverview>, RepositoryError> {
        let sets = self.sets.read().await;
        let mut overviews: Vec<FlashcardSetOverview> = sets
            .values()
            .filter(|set| &set.user_id == user_id)
            .map(FlashcardSet::overview)
            .collect();
        overviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(overviews)
    }

    async fn replace_flashcards(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
        flashcards: &[Flashcard],
    ) -> Result<bool, RepositoryError> {
        match self.sets.write().await.get_mut(&key(user_id, set_id)) {
            Some(set) => {
                set.flashcards = flashcards.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .sets
            .write()
            .await
            .remove(&key(user_id, set_id))
            .is_some())
    }
}
