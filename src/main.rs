use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use studyai::application::ports::{FlashcardSetRepository, NoteRepository};
use studyai::infrastructure::llm::SummarizerFactory;
use studyai::infrastructure::observability::init_tracing;
use studyai::infrastructure::persistence::{
    InMemoryFlashcardSetRepository, InMemoryNoteRepository, PgFlashcardSetRepository,
    PgNoteRepository, create_pool, run_migrations,
};
use studyai::presentation::{
    AppState, Dependencies, Environment, Settings, StorageProvider, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&settings.tracing_config(environment));

    let backend = SummarizerFactory::create(&settings.summarizer)
        .context("failed to initialize summarization backend")?;

    let (note_repository, flashcard_repository): (
        Arc<dyn NoteRepository>,
        Arc<dyn FlashcardSetRepository>,
    ) = match settings.storage.provider {
        StorageProvider::Postgres => {
            let pool = create_pool(&settings.database.url, settings.database.max_connections)
                .await
                .context("failed to connect to PostgreSQL")?;
            run_migrations(&pool).await?;
            (
                Arc::new(PgNoteRepository::new(pool.clone())),
                Arc::new(PgFlashcardSetRepository::new(pool)),
            )
        }
        StorageProvider::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            (
                Arc::new(InMemoryNoteRepository::new()),
                Arc::new(InMemoryFlashcardSetRepository::new()),
            )
        }
    };

    let state = AppState::new(
        Dependencies {
            summarizer: backend.summarizer,
            tokenizer: backend.tokenizer,
            note_repository,
            flashcard_repository,
            file_loader: Dependencies::standard_file_loader(&settings),
        },
        &settings,
    );

    let router = create_router(state, settings.max_upload_bytes());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
