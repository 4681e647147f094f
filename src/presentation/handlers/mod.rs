mod flashcards;
mod health;
mod responses;
mod summarize;

pub use flashcards::{
    create_flashcard_set_handler, delete_flashcard_set_handler, generate_flashcards_handler,
    get_flashcard_set_handler, list_flashcard_sets_handler, update_flashcard_set_handler,
};
pub use health::{health_handler, welcome_handler};
pub use summarize::{
    delete_summary_handler, summarize_raw_handler, summarize_text_handler, upload_images_handler,
    upload_pdf_handler,
};
