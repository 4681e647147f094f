#![allow(dead_code)]

pub mod test_postgres;

use std::sync::Arc;

use studyai::application::ports::{FileLoader, Summarizer, TextTokenizer};
use studyai::application::services::{
    Chunker, FlashcardPolicy, FlashcardService, NoteService, SummarizationPolicy,
    SummarizationService,
};
use studyai::infrastructure::llm::{EchoSummarizer, WordTokenizer};
use studyai::infrastructure::persistence::{
    InMemoryFlashcardSetRepository, InMemoryNoteRepository,
};
use studyai::infrastructure::text_processing::MockFileLoader;
use studyai::presentation::{AppState, Dependencies, Settings, create_router};

pub const TEST_CHUNK_TOKENS: usize = 950;
pub const TEST_OVERLAP_TOKENS: usize = 100;
pub const TEST_UPLOAD_LIMIT: usize = 1024 * 1024;

pub const PHOTOSYNTHESIS_NOTES: &str = "Photosynthesis converts light energy into chemical energy inside plant cells. \
Chlorophyll absorbs mostly red and blue light while reflecting green light. \
The process releases oxygen as a byproduct and stores energy in glucose molecules. \
Plants then use glucose to build cellulose for their cell walls.";

pub fn word_chunker(max_tokens: usize, overlap_tokens: usize) -> Chunker {
    let tokenizer: Arc<dyn TextTokenizer> = Arc::new(WordTokenizer::new());
    Chunker::new(tokenizer, max_tokens, overlap_tokens)
}

pub fn summarization_service(summarizer: Arc<dyn Summarizer>) -> SummarizationService {
    SummarizationService::new(
        summarizer,
        word_chunker(TEST_CHUNK_TOKENS, TEST_OVERLAP_TOKENS),
        SummarizationPolicy::default(),
    )
}

pub fn note_service(
    summarizer: Arc<dyn Summarizer>,
    repository: Arc<InMemoryNoteRepository>,
    file_loader: Arc<dyn FileLoader>,
) -> NoteService {
    NoteService::new(
        Arc::new(summarization_service(summarizer)),
        repository,
        file_loader,
    )
}

pub fn flashcard_service(
    summarizer: Arc<dyn Summarizer>,
    repository: Arc<InMemoryFlashcardSetRepository>,
) -> FlashcardService {
    FlashcardService::new(summarizer, repository, FlashcardPolicy::default())
}

/// Full router over in-memory storage and an echoing backend.
pub fn create_test_app() -> axum::Router {
    create_test_app_with(Arc::new(EchoSummarizer), Arc::new(MockFileLoader::new()))
}

pub fn create_test_app_with(
    summarizer: Arc<dyn Summarizer>,
    file_loader: Arc<dyn FileLoader>,
) -> axum::Router {
    let settings = Settings::default();
    let state = AppState::new(
        Dependencies {
            summarizer,
            tokenizer: Arc::new(WordTokenizer::new()),
            note_repository: Arc::new(InMemoryNoteRepository::new()),
            flashcard_repository: Arc::new(InMemoryFlashcardSetRepository::new()),
            file_loader,
        },
        &settings,
    );
    create_router(state, TEST_UPLOAD_LIMIT)
}
