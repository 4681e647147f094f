use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

pub async fn welcome_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(WelcomeResponse {
            message: "StudyAI Backend is Live".to_string(),
        }),
    )
}
