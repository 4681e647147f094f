use async_trait::async_trait;

use crate::domain::{Flashcard, FlashcardSet, FlashcardSetId, FlashcardSetOverview, UserId};

use super::RepositoryError;

#[async_trait]
pub trait FlashcardSetRepository: Send + Sync {
    /// Returns `false` without writing when the id is already taken.
    async fn create(&self, set: &FlashcardSet) -> Result<bool, RepositoryError>;

    async fn get(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<Option<FlashcardSet>, RepositoryError>;

    /// Newest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FlashcardSetOverview>, RepositoryError>;

    /// Full replace of the card sequence. `false` when the set does not exist.
    async fn replace_flashcards(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
        flashcards: &[Flashcard],
    ) -> Result<bool, RepositoryError>;

    async fn delete(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<bool, RepositoryError>;
}
