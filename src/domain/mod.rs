mod document;
mod flashcard;
mod flashcard_set;
mod identity;
mod note;
mod summary;
mod summary_type;

pub use document::{ContentType, Document};
pub use flashcard::{Flashcard, FlashcardDraft, FlashcardId};
pub use flashcard_set::{FlashcardSet, FlashcardSetId, FlashcardSetOverview};
pub use identity::{UserId, sanitize_key};
pub use note::{Note, NoteId, NoteSource};
pub use summary::{Summary, SummaryId};
pub use summary_type::SummaryType;
