mod file_loader;
mod flashcard_set_repository;
mod note_repository;
mod repository_error;
mod summarizer;
mod text_tokenizer;

pub use file_loader::{FileLoader, FileLoaderError};
pub use flashcard_set_repository::FlashcardSetRepository;
pub use note_repository::{NoteRepository, NoteWriteOutcome};
pub use repository_error::RepositoryError;
pub use summarizer::{GenerationRequest, Summarizer, SummarizerError};
pub use text_tokenizer::{TextTokenizer, TokenizerError};
