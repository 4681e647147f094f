mod in_memory_flashcard_set_repository;
mod in_memory_note_repository;
mod pg_flashcard_set_repository;
mod pg_note_repository;

pub use in_memory_flashcard_set_repository::InMemoryFlashcardSetRepository;
pub use in_memory_note_repository::InMemoryNoteRepository;
pub use pg_flashcard_set_repository::PgFlashcardSetRepository;
pub use pg_note_repository::PgNoteRepository;
