use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::identity::{UserId, sanitize_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteSource {
    Text,
    Pdf,
    Image,
}

impl NoteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteSource::Text => "text",
            NoteSource::Pdf => "pdf",
            NoteSource::Image => "image",
        }
    }
}

impl FromStr for NoteSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(NoteSource::Text),
            "pdf" => Ok(NoteSource::Pdf),
            "image" => Ok(NoteSource::Image),
            other => Err(format!("Invalid note source: {}", other)),
        }
    }
}

impl fmt::Display for NoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deterministic from `(source, title)`: the same title uploaded twice from
/// the same source maps to the same note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    pub fn for_source_and_title(source: &str, title: &str) -> Self {
        Self(format!("{}_{}", sanitize_key(source), sanitize_key(title)))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(user_id: UserId, title: String, content: String, source: String) -> Self {
        Self {
            id: NoteId::for_source_and_title(&source, &title),
            user_id,
            title,
            content,
            source,
            created_at: Utc::now(),
        }
    }
}
