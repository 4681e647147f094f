use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_flashcard_set_handler, delete_flashcard_set_handler, delete_summary_handler,
    generate_flashcards_handler, get_flashcard_set_handler, health_handler,
    list_flashcard_sets_handler, summarize_raw_handler, summarize_text_handler,
    update_flashcard_set_handler, upload_images_handler, upload_pdf_handler, welcome_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .route("/summarize_text", post(summarize_text_handler))
        .route("/summarize_raw", post(summarize_raw_handler))
        .route("/upload_pdf", post(upload_pdf_handler))
        .route("/upload_images", post(upload_images_handler))
        .route(
            "/delete_summary/{user_id}/{summary_id}",
            delete(delete_summary_handler),
        )
        .route("/generate_flashcards", post(generate_flashcards_handler))
        .route("/create_flashcard_set", post(create_flashcard_set_handler))
        .route("/flashcard_sets/{user_id}", get(list_flashcard_sets_handler))
        .route(
            "/flashcard_set/{user_id}/{set_id}",
            get(get_flashcard_set_handler)
                .put(update_flashcard_set_handler)
                .delete(delete_flashcard_set_handler),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
