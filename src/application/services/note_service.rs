use std::sync::Arc;

use crate::application::ports::{FileLoader, NoteRepository, NoteWriteOutcome, RepositoryError};
use crate::domain::{Document, Note, NoteId, NoteSource, Summary, SummaryId, SummaryType, UserId};

use super::summarization_service::{SummarizationError, SummarizationService, SummaryOutcome};

const MIN_SUMMARY_CHARS: usize = 10;

#[derive(Debug, Clone)]
pub struct SummarizeRequest {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub source: NoteSource,
    pub summary_type: SummaryType,
}

/// One uploaded file awaiting text extraction.
#[derive(Debug, Clone)]
pub struct Upload {
    pub data: Vec<u8>,
    pub document: Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyContent,
    NoTextFound(NoteSource),
    TooShort,
    Unavailable,
    SummaryTooShort,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::EmptyContent => "Content is empty.",
            RejectReason::NoTextFound(NoteSource::Pdf) => "No text found in PDF.",
            RejectReason::NoTextFound(NoteSource::Image) => "No text extracted from images.",
            RejectReason::NoTextFound(NoteSource::Text) => "No text found.",
            RejectReason::TooShort => "Content too short or invalid after cleaning.",
            RejectReason::Unavailable => "Summary could not be generated.",
            RejectReason::SummaryTooShort => "Summary too short – probably invalid input.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummarizeOutcome {
    Saved {
        summary: String,
        summary_id: SummaryId,
        note_id: NoteId,
        fallback: bool,
    },
    AlreadyExists {
        note_id: NoteId,
    },
    Rejected(RejectReason),
}

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error(transparent)]
    Summarization(#[from] SummarizationError),
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub struct NoteService {
    summarization: Arc<SummarizationService>,
    repository: Arc<dyn NoteRepository>,
    file_loader: Arc<dyn FileLoader>,
}

impl NoteService {
    pub fn new(
        summarization: Arc<SummarizationService>,
        repository: Arc<dyn NoteRepository>,
        file_loader: Arc<dyn FileLoader>,
    ) -> Self {
        Self {
            summarization,
            repository,
            file_loader,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(user_id = %request.user_id, title = %request.title, source = %request.source)
    )]
    pub async fn summarize_and_save(
        &self,
        request: SummarizeRequest,
    ) -> Result<SummarizeOutcome, NoteServiceError> {
        if request.content.trim().is_empty() {
            return Ok(SummarizeOutcome::Rejected(RejectReason::EmptyContent));
        }

        let note_id = NoteId::for_source_and_title(request.source.as_str(), &request.title);
        if self.repository.note_exists(&request.user_id, &note_id).await? {
            tracing::warn!(note_id = %note_id, "Note already exists, skipping summarization");
            return Ok(SummarizeOutcome::AlreadyExists { note_id });
        }

        let outcome = self
            .summarization
            .summarize(&request.content, request.summary_type)
            .await?;

        let (text, fallback) = match outcome {
            SummaryOutcome::Generated(text) => (text, false),
            SummaryOutcome::Fallback(text) => (text, true),
            SummaryOutcome::EmptyContent => {
                return Ok(SummarizeOutcome::Rejected(RejectReason::EmptyContent));
            }
            SummaryOutcome::TooShort { .. } => {
                return Ok(SummarizeOutcome::Rejected(RejectReason::TooShort));
            }
            SummaryOutcome::Unavailable => {
                return Ok(SummarizeOutcome::Rejected(RejectReason::Unavailable));
            }
        };

        if text.trim().chars().count() < MIN_SUMMARY_CHARS {
            return Ok(SummarizeOutcome::Rejected(RejectReason::SummaryTooShort));
        }

        let note = Note::new(
            request.user_id.clone(),
            request.title,
            request.content,
            request.source.to_string(),
        );
        let summary = Summary::for_note(&note.id, request.user_id, text, request.summary_type);

        match self.repository.save_note_with_summary(&note, &summary).await? {
            NoteWriteOutcome::Created => {
                tracing::info!(note_id = %note.id, summary_id = %summary.id, fallback, "Note saved");
                Ok(SummarizeOutcome::Saved {
                    summary: summary.text,
                    summary_id: summary.id,
                    note_id: note.id,
                    fallback,
                })
            }
            NoteWriteOutcome::AlreadyExists => {
                tracing::warn!(note_id = %note.id, "Note already exists, write skipped");
                Ok(SummarizeOutcome::AlreadyExists { note_id: note.id })
            }
        }
    }

    /// Extracts text from every upload, joins it with newlines and summarizes
    /// the result. A file that fails extraction contributes nothing.
    #[tracing::instrument(skip(self, uploads), fields(files = uploads.len()))]
    pub async fn summarize_uploads(
        &self,
        user_id: UserId,
        title: String,
        source: NoteSource,
        summary_type: SummaryType,
        uploads: Vec<Upload>,
    ) -> Result<SummarizeOutcome, NoteServiceError> {
        let mut texts = Vec::with_capacity(uploads.len());
        for upload in &uploads {
            match self
                .file_loader
                .extract_text(&upload.data, &upload.document)
                .await
            {
                Ok(text) => texts.push(text),
                Err(e) => tracing::warn!(
                    filename = %upload.document.filename,
                    error = %e,
                    "Text extraction failed"
                ),
            }
        }

        let content = texts.join("\n").trim().to_string();
        if content.is_empty() {
            return Ok(SummarizeOutcome::Rejected(RejectReason::NoTextFound(source)));
        }

        self.summarize_and_save(SummarizeRequest {
            user_id,
            title,
            content,
            source,
            summary_type,
        })
        .await
    }

    /// Removes the summary and its note. `None` when the summary is unknown.
    pub async fn delete_summary(
        &self,
        user_id: &UserId,
        summary_id: &SummaryId,
    ) -> Result<Option<NoteId>, NoteServiceError> {
        let deleted = self
            .repository
            .delete_summary_cascade(user_id, summary_id)
            .await?;

        match &deleted {
            Some(note_id) => {
                tracing::info!(summary_id = %summary_id, note_id = %note_id, "Summary and note deleted")
            }
            None => tracing::info!(summary_id = %summary_id, "Summary not found"),
        }
        Ok(deleted)
    }
}
