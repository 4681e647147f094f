use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `{error, success: false}`; also used with 200 for business rejections.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}

/// `{success, message}` for deletes, updates and lookups that missed.
#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            success: false,
        }),
    )
        .into_response()
}

pub fn rejection(error: impl Into<String>) -> Response {
    error_response(StatusCode::OK, error)
}

pub fn message_response(status: StatusCode, success: bool, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageResponse {
            success,
            message: message.into(),
        }),
    )
        .into_response()
}

pub fn not_found(message: impl Into<String>) -> Response {
    message_response(StatusCode::NOT_FOUND, false, message)
}
