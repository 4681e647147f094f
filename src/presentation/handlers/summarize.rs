use axum::Json;
use axum::extract::{Form, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::{
    NoteServiceError, SummarizeOutcome, SummarizeRequest, Upload,
};
use crate::domain::{ContentType, Document, NoteSource, SummaryId, SummaryType, UserId};
use crate::presentation::state::AppState;

use super::responses::{error_response, message_response, not_found, rejection};

#[derive(Debug, Deserialize)]
pub struct SummarizeTextRequest {
    pub content: String,
    pub user_id: String,
    pub title: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    NoteSource::Text.as_str().to_string()
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRawForm {
    pub content: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub summary_type: Option<String>,
}

#[derive(Serialize)]
pub struct SummarySavedResponse {
    pub summary: String,
    pub summary_id: String,
    pub note_id: String,
    pub success: bool,
}

#[derive(Serialize)]
pub struct NoteExistsResponse {
    pub warning: String,
    pub success: bool,
    pub note_id: String,
}

#[derive(Serialize)]
pub struct SummaryDeletedResponse {
    pub success: bool,
    pub message: String,
    pub note_id: String,
}

#[tracing::instrument(skip(state, request), fields(user_id = %request.user_id, title = %request.title))]
pub async fn summarize_text_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeTextRequest>,
) -> Response {
    let source = match request.source.parse::<NoteSource>() {
        Ok(source) => source,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    summarize(
        &state,
        request.user_id,
        request.title,
        request.content,
        source,
        SummaryType::Detailed,
    )
    .await
}

#[tracing::instrument(skip(state, form), fields(user_id = %form.user_id, title = %form.title))]
pub async fn summarize_raw_handler(
    State(state): State<AppState>,
    Form(form): Form<SummarizeRawForm>,
) -> Response {
    let summary_type = summary_type_or_default(form.summary_type.as_deref());
    summarize(
        &state,
        form.user_id,
        form.title,
        form.content,
        NoteSource::Text,
        summary_type,
    )
    .await
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_pdf_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    summarize_uploads(&state, multipart, NoteSource::Pdf).await
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_images_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    summarize_uploads(&state, multipart, NoteSource::Image).await
}

#[tracing::instrument(skip(state))]
pub async fn delete_summary_handler(
    State(state): State<AppState>,
    Path((user_id, summary_id)): Path<(String, String)>,
) -> Response {
    let user_id = UserId::new(user_id);
    let summary_id = SummaryId::from_raw(summary_id);

    match state.note_service.delete_summary(&user_id, &summary_id).await {
        Ok(Some(note_id)) => (
            StatusCode::OK,
            Json(SummaryDeletedResponse {
                success: true,
                message: "Deleted".to_string(),
                note_id: note_id.to_string(),
            }),
        )
            .into_response(),
        Ok(None) => not_found("Summary not found"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete summary");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, false, e.to_string())
        }
    }
}

async fn summarize(
    state: &AppState,
    user_id: String,
    title: String,
    content: String,
    source: NoteSource,
    summary_type: SummaryType,
) -> Response {
    let user_id = UserId::new(user_id);
    if user_id.is_blank() {
        return error_response(StatusCode::BAD_REQUEST, "user_id is required");
    }

    let result = state
        .note_service
        .summarize_and_save(SummarizeRequest {
            user_id,
            title,
            content,
            source,
            summary_type,
        })
        .await;

    outcome_response(result)
}

async fn summarize_uploads(state: &AppState, multipart: Multipart, source: NoteSource) -> Response {
    let form = match read_upload_form(multipart, source).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let result = state
        .note_service
        .summarize_uploads(
            form.user_id,
            form.title,
            source,
            form.summary_type,
            form.uploads,
        )
        .await;

    outcome_response(result)
}

fn outcome_response(result: Result<SummarizeOutcome, NoteServiceError>) -> Response {
    match result {
        Ok(SummarizeOutcome::Saved {
            summary,
            summary_id,
            note_id,
            ..
        }) => (
            StatusCode::OK,
            Json(SummarySavedResponse {
                summary,
                summary_id: summary_id.to_string(),
                note_id: note_id.to_string(),
                success: true,
            }),
        )
            .into_response(),
        Ok(SummarizeOutcome::AlreadyExists { note_id }) => (
            StatusCode::OK,
            Json(NoteExistsResponse {
                warning: "Note already existed.".to_string(),
                success: false,
                note_id: note_id.to_string(),
            }),
        )
            .into_response(),
        Ok(SummarizeOutcome::Rejected(reason)) => rejection(reason.message()),
        Err(NoteServiceError::Summarization(e)) => {
            tracing::error!(error = %e, "Summarization backend unavailable");
            error_response(StatusCode::BAD_GATEWAY, "Summarization backend unavailable.")
        }
        Err(NoteServiceError::Repository(e)) => {
            tracing::error!(error = %e, "Failed to persist note");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save note.")
        }
    }
}

fn summary_type_or_default(value: Option<&str>) -> SummaryType {
    value
        .filter(|v| !v.trim().is_empty())
        .map(SummaryType::parse_or_default)
        .unwrap_or_default()
}

struct UploadForm {
    user_id: UserId,
    title: String,
    summary_type: SummaryType,
    uploads: Vec<Upload>,
}

/// Reads `file`/`files` parts plus the `user_id`, `title` and optional
/// `summary_type` text fields. Every file is treated as `source` content,
/// whatever its declared MIME type.
async fn read_upload_form(
    mut multipart: Multipart,
    source: NoteSource,
) -> Result<UploadForm, Response> {
    let content_type = ContentType::from(source);

    let mut user_id = None;
    let mut title = None;
    let mut summary_type = None;
    let mut uploads = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "files" | "files[]" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read file: {}", e),
                    )
                })?;
                tracing::debug!(filename = %filename, bytes = data.len(), "File received");
                uploads.push(Upload {
                    document: Document::new(filename, content_type),
                    data: data.to_vec(),
                });
            }
            "user_id" | "title" | "summary_type" => {
                let value = field.text().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read field {}: {}", name, e),
                    )
                })?;
                match name.as_str() {
                    "user_id" => user_id = Some(value),
                    "title" => title = Some(value),
                    _ => summary_type = Some(value),
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let user_id = user_id
        .map(UserId::new)
        .filter(|id| !id.is_blank())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Missing form field: user_id"))?;
    let title =
        title.ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Missing form field: title"))?;
    if uploads.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
    }

    Ok(UploadForm {
        user_id,
        title,
        summary_type: summary_type_or_default(summary_type.as_deref()),
        uploads,
    })
}
