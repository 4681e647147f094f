use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{
    FlashcardOutcome, FlashcardServiceError, GenerateFlashcardsRequest, ReplaceOutcome,
};
use crate::domain::{Flashcard, FlashcardDraft, FlashcardSetId, FlashcardSetOverview, UserId};
use crate::presentation::state::AppState;

use super::responses::{error_response, message_response, not_found, rejection};

const SET_NOT_FOUND: &str = "Flashcard set not found";

#[derive(Debug, Deserialize)]
pub struct GenerateFlashcardsBody {
    pub content: String,
    pub user_id: String,
    pub set_name: String,
    #[serde(default)]
    pub note_id: Option<String>,
    #[serde(default)]
    pub note_title: Option<String>,
    #[serde(default)]
    pub num_flashcards: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFlashcardSetBody {
    pub user_id: String,
    #[serde(alias = "name")]
    pub set_name: String,
    #[serde(default)]
    pub note_id: Option<String>,
    #[serde(default)]
    pub note_title: Option<String>,
    pub flashcards: Vec<FlashcardDraft>,
}

#[derive(Serialize)]
pub struct GeneratedSetResponse {
    pub success: bool,
    pub set_id: String,
    pub flashcards: Vec<FlashcardDraft>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct SetExistsResponse {
    pub warning: String,
    pub success: bool,
    pub set_id: String,
}

#[derive(Serialize)]
pub struct FlashcardSetsResponse {
    pub success: bool,
    pub sets: Vec<SetOverviewBody>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOverviewBody {
    pub id: String,
    pub name: String,
    pub note_id: Option<String>,
    pub note_title: Option<String>,
    pub flashcard_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<FlashcardSetOverview> for SetOverviewBody {
    fn from(o: FlashcardSetOverview) -> Self {
        Self {
            id: o.id.to_string(),
            name: o.name,
            note_id: o.note_id,
            note_title: o.note_title,
            flashcard_count: o.flashcard_count,
            created_at: o.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDetailResponse {
    pub success: bool,
    pub id: String,
    pub name: String,
    pub note_id: Option<String>,
    pub note_title: Option<String>,
    pub flashcards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state, body), fields(user_id = %body.user_id, set_name = %body.set_name))]
pub async fn generate_flashcards_handler(
    State(state): State<AppState>,
    Json(body): Json<GenerateFlashcardsBody>,
) -> Response {
    let user_id = UserId::new(body.user_id);
    if user_id.is_blank() {
        return error_response(StatusCode::BAD_REQUEST, "user_id is required");
    }

    let result = state
        .flashcard_service
        .generate_set(GenerateFlashcardsRequest {
            user_id,
            set_name: body.set_name,
            content: body.content,
            note_id: body.note_id,
            note_title: body.note_title,
            num_flashcards: body.num_flashcards,
        })
        .await;

    set_outcome_response(result)
}

#[tracing::instrument(skip(state, body), fields(user_id = %body.user_id, set_name = %body.set_name))]
pub async fn create_flashcard_set_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateFlashcardSetBody>,
) -> Response {
    let user_id = UserId::new(body.user_id);
    if user_id.is_blank() {
        return error_response(StatusCode::BAD_REQUEST, "user_id is required");
    }

    let result = state
        .flashcard_service
        .create_manual_set(
            user_id,
            body.set_name,
            body.note_id,
            body.note_title,
            body.flashcards,
        )
        .await;

    set_outcome_response(result)
}

#[tracing::instrument(skip(state))]
pub async fn list_flashcard_sets_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.flashcard_service.list_sets(&UserId::new(user_id)).await {
        Ok(sets) => (
            StatusCode::OK,
            Json(FlashcardSetsResponse {
                success: true,
                sets: sets.into_iter().map(SetOverviewBody::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_flashcard_set_handler(
    State(state): State<AppState>,
    Path((user_id, set_id)): Path<(String, String)>,
) -> Response {
    let user_id = UserId::new(user_id);
    let set_id = FlashcardSetId::from_raw(set_id);

    match state.flashcard_service.get_set(&user_id, &set_id).await {
        Ok(Some(set)) => (
            StatusCode::OK,
            Json(SetDetailResponse {
                success: true,
                id: set.id.to_string(),
                name: set.name,
                note_id: set.note_id,
                note_title: set.note_title,
                flashcards: set.flashcards,
                created_at: set.created_at,
            }),
        )
            .into_response(),
        Ok(None) => not_found(SET_NOT_FOUND),
        Err(e) => service_error(e),
    }
}

/// Body is the full replacement card list; incoming card ids are ignored.
#[tracing::instrument(skip(state, drafts), fields(cards = drafts.len()))]
pub async fn update_flashcard_set_handler(
    State(state): State<AppState>,
    Path((user_id, set_id)): Path<(String, String)>,
    Json(drafts): Json<Vec<FlashcardDraft>>,
) -> Response {
    let user_id = UserId::new(user_id);
    let set_id = FlashcardSetId::from_raw(set_id);

    match state
        .flashcard_service
        .replace_flashcards(&user_id, &set_id, drafts)
        .await
    {
        Ok(ReplaceOutcome::Replaced(_)) => message_response(StatusCode::OK, true, "Updated"),
        Ok(ReplaceOutcome::NotFound) => not_found(SET_NOT_FOUND),
        Ok(ReplaceOutcome::InvalidFlashcard { index }) => invalid_flashcard(index),
        Err(e) => service_error(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_flashcard_set_handler(
    State(state): State<AppState>,
    Path((user_id, set_id)): Path<(String, String)>,
) -> Response {
    let user_id = UserId::new(user_id);
    let set_id = FlashcardSetId::from_raw(set_id);

    match state.flashcard_service.delete_set(&user_id, &set_id).await {
        Ok(true) => message_response(StatusCode::OK, true, "Deleted"),
        Ok(false) => not_found(SET_NOT_FOUND),
        Err(e) => service_error(e),
    }
}

fn set_outcome_response(result: Result<FlashcardOutcome, FlashcardServiceError>) -> Response {
    match result {
        Ok(FlashcardOutcome::Created(set)) => {
            let flashcards: Vec<FlashcardDraft> = set
                .flashcards
                .into_iter()
                .map(|card| FlashcardDraft::new(card.question, card.answer))
                .collect();
            (
                StatusCode::OK,
                Json(GeneratedSetResponse {
                    success: true,
                    set_id: set.id.to_string(),
                    count: flashcards.len(),
                    flashcards,
                }),
            )
                .into_response()
        }
        Ok(FlashcardOutcome::ContentTooShort { .. }) => {
            rejection("Content too short for flashcard generation.")
        }
        Ok(FlashcardOutcome::NoFlashcards) => {
            rejection("No flashcards could be generated from this content.")
        }
        Ok(FlashcardOutcome::InvalidFlashcard { index }) => invalid_flashcard(index),
        Ok(FlashcardOutcome::AlreadyExists(set_id)) => (
            StatusCode::OK,
            Json(SetExistsResponse {
                warning: "Flashcard set already existed.".to_string(),
                success: false,
                set_id: set_id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

fn invalid_flashcard(index: usize) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Flashcard {} needs both a question and an answer.", index),
    )
}

fn service_error(e: FlashcardServiceError) -> Response {
    tracing::error!(error = %e, "Flashcard repository failure");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Flashcard storage failed.")
}
