use std::sync::Arc;

use crate::application::ports::{FlashcardSetRepository, GenerationRequest, RepositoryError, Summarizer};
use crate::domain::{
    Flashcard, FlashcardDraft, FlashcardSet, FlashcardSetId, FlashcardSetOverview, UserId,
};

use super::flashcard_extraction::{ExtractionCascade, MAX_FLASHCARDS};
use super::text_cleaning::{strip_code_and_collapse, word_count};

#[derive(Debug, Clone)]
pub struct FlashcardPolicy {
    pub default_count: usize,
    pub max_count: usize,
    pub min_content_words: usize,
    /// Token bounds for the key-point response.
    pub response_min_length: usize,
    pub response_max_length: usize,
}

impl Default for FlashcardPolicy {
    fn default() -> Self {
        Self {
            default_count: 10,
            max_count: MAX_FLASHCARDS,
            min_content_words: 20,
            response_min_length: 100,
            response_max_length: 512,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateFlashcardsRequest {
    pub user_id: UserId,
    pub set_name: String,
    pub content: String,
    pub note_id: Option<String>,
    pub note_title: Option<String>,
    pub num_flashcards: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlashcardOutcome {
    Created(FlashcardSet),
    ContentTooShort { word_count: usize },
    NoFlashcards,
    /// A caller-supplied card with an empty side, by position.
    InvalidFlashcard { index: usize },
    AlreadyExists(FlashcardSetId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplaceOutcome {
    Replaced(Vec<Flashcard>),
    NotFound,
    InvalidFlashcard { index: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum FlashcardServiceError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub struct FlashcardService {
    summarizer: Arc<dyn Summarizer>,
    repository: Arc<dyn FlashcardSetRepository>,
    cascade: ExtractionCascade,
    policy: FlashcardPolicy,
}

impl FlashcardService {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        repository: Arc<dyn FlashcardSetRepository>,
        policy: FlashcardPolicy,
    ) -> Self {
        Self {
            summarizer,
            repository,
            cascade: ExtractionCascade::standard(),
            policy,
        }
    }

    /// Condenses `content` through the backend and parses cards from the
    /// response. `None` when the content is too short to bother.
    pub async fn extract(&self, content: &str, count: usize) -> Option<Vec<FlashcardDraft>> {
        let cleaned = strip_code_and_collapse(content);
        let words = word_count(&cleaned);
        if words < self.policy.min_content_words {
            tracing::info!(word_count = words, "Content too short for flashcards");
            return None;
        }

        let count = count.max(1).min(self.policy.max_count.max(1));
        let request = GenerationRequest::new(
            format!("Summarize the key points from this text in {count} clear sentences: "),
            cleaned.clone(),
        )
        .with_lengths(self.policy.response_min_length, self.policy.response_max_length);

        let response = match self.summarizer.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Key-point generation failed, synthesizing from content");
                String::new()
            }
        };

        Some(self.cascade.run(&response, &cleaned, count))
    }

    #[tracing::instrument(skip(self, request), fields(user_id = %request.user_id, set_name = %request.set_name))]
    pub async fn generate_set(
        &self,
        request: GenerateFlashcardsRequest,
    ) -> Result<FlashcardOutcome, FlashcardServiceError> {
        let count = request.num_flashcards.unwrap_or(self.policy.default_count);
        let Some(drafts) = self.extract(&request.content, count).await else {
            return Ok(FlashcardOutcome::ContentTooShort {
                word_count: word_count(&request.content),
            });
        };

        if drafts.is_empty() {
            tracing::warn!("No flashcards derived from content");
            return Ok(FlashcardOutcome::NoFlashcards);
        }

        let set = FlashcardSet::new(
            request.user_id,
            request.set_name,
            request.note_id,
            request.note_title,
            drafts,
        );
        self.persist(set).await
    }

    #[tracing::instrument(skip(self, drafts, note_id, note_title), fields(cards = drafts.len()))]
    pub async fn create_manual_set(
        &self,
        user_id: UserId,
        name: String,
        note_id: Option<String>,
        note_title: Option<String>,
        drafts: Vec<FlashcardDraft>,
    ) -> Result<FlashcardOutcome, FlashcardServiceError> {
        if let Some(index) = first_invalid(&drafts) {
            return Ok(FlashcardOutcome::InvalidFlashcard { index });
        }

        let set = FlashcardSet::new(user_id, name, note_id, note_title, drafts);
        self.persist(set).await
    }

    pub async fn get_set(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<Option<FlashcardSet>, FlashcardServiceError> {
        Ok(self.repository.get(user_id, set_id).await?)
    }

    pub async fn list_sets(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FlashcardSetOverview>, FlashcardServiceError> {
        Ok(self.repository.list_by_user(user_id).await?)
    }

    /// Replaces every card of the set; ids are re-issued by position.
    /// Cards are validated like a manual set before anything is written.
    pub async fn replace_flashcards(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
        drafts: Vec<FlashcardDraft>,
    ) -> Result<ReplaceOutcome, FlashcardServiceError> {
        if let Some(index) = first_invalid(&drafts) {
            return Ok(ReplaceOutcome::InvalidFlashcard { index });
        }

        let flashcards = Flashcard::sequence(drafts);
        let updated = self
            .repository
            .replace_flashcards(user_id, set_id, &flashcards)
            .await?;

        if updated {
            tracing::info!(set_id = %set_id, cards = flashcards.len(), "Flashcard set updated");
            Ok(ReplaceOutcome::Replaced(flashcards))
        } else {
            Ok(ReplaceOutcome::NotFound)
        }
    }

    pub async fn delete_set(
        &self,
        user_id: &UserId,
        set_id: &FlashcardSetId,
    ) -> Result<bool, FlashcardServiceError> {
        let deleted = self.repository.delete(user_id, set_id).await?;
        if deleted {
            tracing::info!(set_id = %set_id, "Flashcard set deleted");
        }
        Ok(deleted)
    }

    async fn persist(&self, set: FlashcardSet) -> Result<FlashcardOutcome, FlashcardServiceError> {
        if !self.repository.create(&set).await? {
            tracing::warn!(set_id = %set.id, "Flashcard set already exists, skipping write");
            return Ok(FlashcardOutcome::AlreadyExists(set.id));
        }

        tracing::info!(set_id = %set.id, cards = set.flashcards.len(), "Flashcard set saved");
        Ok(FlashcardOutcome::Created(set))
    }
}

fn first_invalid(drafts: &[FlashcardDraft]) -> Option<usize> {
    drafts
        .iter()
        .position(|d| d.question.trim().is_empty() || d.answer.trim().is_empty())
}
