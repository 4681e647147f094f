mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, ExtractionSettings, FlashcardSettings, LoggingSettings, ServerSettings,
    Settings, StorageProvider, StorageSettings, SummarizationSettings, SummarizerProvider,
    SummarizerSettings,
};
