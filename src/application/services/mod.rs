mod chunker;
mod flashcard_extraction;
mod flashcard_service;
mod note_service;
mod section_splitter;
mod summarization_service;
pub mod text_cleaning;

pub use chunker::{Chunker, token_windows};
pub use flashcard_extraction::{
    ExtractionCascade, ExtractionInput, MAX_FLASHCARDS, MarkerMatcher, NumberedQuestionMatcher,
    QaMatcher, QuestionSentenceMatcher, SentenceSynthesisMatcher, dedup_by_question, key_term,
};
pub use flashcard_service::{
    FlashcardOutcome, FlashcardPolicy, FlashcardService, FlashcardServiceError,
    GenerateFlashcardsRequest, ReplaceOutcome,
};
pub use note_service::{
    NoteService, NoteServiceError, RejectReason, SummarizeOutcome, SummarizeRequest, Upload,
};
pub use section_splitter::split_sections;
pub use summarization_service::{
    LengthPolicy, SUMMARY_INSTRUCTION, SummarizationError, SummarizationPolicy,
    SummarizationService, SummaryOutcome,
};
