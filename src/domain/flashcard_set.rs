use std::fmt;

use chrono::{DateTime, Utc};

use super::flashcard::{Flashcard, FlashcardDraft};
use super::identity::{UserId, random_suffix, sanitize_key};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlashcardSetId(String);

impl FlashcardSetId {
    pub fn generate(set_name: &str) -> Self {
        Self(format!(
            "flashcard_set_{}_{}",
            sanitize_key(set_name),
            random_suffix(8)
        ))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlashcardSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardSet {
    pub id: FlashcardSetId,
    pub user_id: UserId,
    pub name: String,
    pub note_id: Option<String>,
    pub note_title: Option<String>,
    pub flashcards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
}

impl FlashcardSet {
    pub fn new(
        user_id: UserId,
        name: String,
        note_id: Option<String>,
        note_title: Option<String>,
        drafts: Vec<FlashcardDraft>,
    ) -> Self {
        Self {
            id: FlashcardSetId::generate(&name),
            user_id,
            name,
            note_id,
            note_title,
            flashcards: Flashcard::sequence(drafts),
            created_at: Utc::now(),
        }
    }

    pub fn overview(&self) -> FlashcardSetOverview {
        FlashcardSetOverview {
            id: self.id.clone(),
            name: self.name.clone(),
            note_id: self.note_id.clone(),
            note_title: self.note_title.clone(),
            flashcard_count: self.flashcards.len(),
            created_at: self.created_at,
        }
    }
}

/// Listing row: a set without its cards.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardSetOverview {
    pub id: FlashcardSetId,
    pub name: String,
    pub note_id: Option<String>,
    pub note_title: Option<String>,
    pub flashcard_count: usize,
    pub created_at: DateTime<Utc>,
}
