use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    FileLoader, FlashcardSetRepository, NoteRepository, Summarizer, TextTokenizer,
};
use crate::application::services::{Chunker, FlashcardService, NoteService, SummarizationService};
use crate::infrastructure::text_processing::CompositeFileLoader;
use crate::presentation::config::Settings;

/// Shared handles injected into every handler. The backend inside is loaded
/// once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub note_service: Arc<NoteService>,
    pub flashcard_service: Arc<FlashcardService>,
}

/// Everything the services need from the outside.
pub struct Dependencies {
    pub summarizer: Arc<dyn Summarizer>,
    pub tokenizer: Arc<dyn TextTokenizer>,
    pub note_repository: Arc<dyn NoteRepository>,
    pub flashcard_repository: Arc<dyn FlashcardSetRepository>,
    pub file_loader: Arc<dyn FileLoader>,
}

impl Dependencies {
    pub fn standard_file_loader(settings: &Settings) -> Arc<dyn FileLoader> {
        Arc::new(CompositeFileLoader::standard(
            &settings.extraction.tesseract_command,
            Duration::from_secs(settings.extraction.timeout_secs),
        ))
    }
}

impl AppState {
    pub fn new(deps: Dependencies, settings: &Settings) -> Self {
        let chunker = Chunker::new(
            deps.tokenizer,
            settings.summarization.chunk_tokens,
            settings.summarization.overlap_tokens,
        );
        let summarization = Arc::new(SummarizationService::new(
            Arc::clone(&deps.summarizer),
            chunker,
            settings.summarization.policy(),
        ));

        Self {
            note_service: Arc::new(NoteService::new(
                summarization,
                deps.note_repository,
                deps.file_loader,
            )),
            flashcard_service: Arc::new(FlashcardService::new(
                deps.summarizer,
                deps.flashcard_repository,
                settings.flashcards.policy(),
            )),
        }
    }
}
