use std::fmt;

use serde::{Deserialize, Serialize};

use super::identity::random_suffix;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashcardId(String);

impl FlashcardId {
    pub fn for_position(index: usize) -> Self {
        Self(format!("card_{}_{}", index, random_suffix(4)))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlashcardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A question/answer pair before it is placed in a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub question: String,
    pub answer: String,
}

impl FlashcardDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: FlashcardId,
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    /// Ids encode the position in the owning set, so a full replace re-numbers.
    pub fn sequence(drafts: Vec<FlashcardDraft>) -> Vec<Flashcard> {
        drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| Flashcard {
                id: FlashcardId::for_position(index),
                question: draft.question,
                answer: draft.answer,
            })
            .collect()
    }
}
