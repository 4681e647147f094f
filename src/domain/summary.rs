use std::fmt;

use chrono::{DateTime, Utc};

use super::identity::{UserId, random_suffix};
use super::note::NoteId;
use super::summary_type::SummaryType;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryId(String);

impl SummaryId {
    pub fn generate(note_id: &NoteId, summary_type: SummaryType) -> Self {
        Self(format!("{}_{}_{}", note_id, summary_type, random_suffix(8)))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SummaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Written in the same batch as its note; `note_id` is a weak back-reference
/// that only matters for the cascading delete.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub id: SummaryId,
    pub user_id: UserId,
    pub note_id: NoteId,
    pub text: String,
    pub summary_type: SummaryType,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    pub fn for_note(
        note_id: &NoteId,
        user_id: UserId,
        text: String,
        summary_type: SummaryType,
    ) -> Self {
        Self {
            id: SummaryId::generate(note_id, summary_type),
            user_id,
            note_id: note_id.clone(),
            text,
            summary_type,
            created_at: Utc::now(),
        }
    }
}
