mod helpers;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use studyai::infrastructure::llm::{EchoSummarizer, FailingSummarizer};
use studyai::infrastructure::text_processing::MockFileLoader;

use helpers::{PHOTOSYNTHESIS_NOTES, create_test_app, create_test_app_with};

const BOUNDARY: &str = "studyai-test-boundary";

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn multipart_request(uri: &str, fields: &[(&str, &str)], files: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    for (filename, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn summarize_body(title: &str, content: &str) -> Value {
    json!({ "content": content, "user_id": "student-1", "title": title })
}

#[tokio::test]
async fn given_root_when_requested_then_returns_welcome() {
    let app = create_test_app();

    let (status, json) = send(&app, empty_request("GET", "/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "StudyAI Backend is Live");
}

#[tokio::test]
async fn given_health_endpoint_when_requested_then_healthy() {
    let app = create_test_app();

    let (status, json) = send(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn given_empty_content_when_summarizing_text_then_rejected_with_message() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        json_request("POST", "/summarize_text", summarize_body("Empty", "")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "error": "Content is empty.", "success": false }));
}

#[tokio::test]
async fn given_same_title_twice_when_summarizing_text_then_second_warns_note_exists() {
    let app = create_test_app();

    let (_, first) = send(
        &app,
        json_request(
            "POST",
            "/summarize_text",
            summarize_body("Chapter 1", PHOTOSYNTHESIS_NOTES),
        ),
    )
    .await;
    let (status, second) = send(
        &app,
        json_request(
            "POST",
            "/summarize_text",
            summarize_body("Chapter 1", PHOTOSYNTHESIS_NOTES),
        ),
    )
    .await;

    assert_eq!(first["success"], true);
    assert_eq!(first["note_id"], "text_Chapter_1");
    assert!(first["summary_id"].as_str().unwrap().starts_with("text_Chapter_1_detailed_"));
    assert_eq!(first["summary"], PHOTOSYNTHESIS_NOTES);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], false);
    assert_eq!(second["warning"], "Note already existed.");
    assert_eq!(second["note_id"], "text_Chapter_1");
}

#[tokio::test]
async fn given_blank_user_id_when_summarizing_text_then_bad_request() {
    let app = create_test_app();
    let body = json!({ "content": PHOTOSYNTHESIS_NOTES, "user_id": " ", "title": "Chapter 1" });

    let (status, json) = send(&app, json_request("POST", "/summarize_text", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn given_backend_down_when_summarizing_text_then_bad_gateway() {
    let app = create_test_app_with(Arc::new(FailingSummarizer), Arc::new(MockFileLoader::new()));

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/summarize_text",
            summarize_body("Chapter 1", PHOTOSYNTHESIS_NOTES),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn given_form_with_summary_type_when_summarizing_raw_then_summary_id_carries_type() {
    let app = create_test_app();
    let form = format!(
        "content={}&user_id=student-1&title=Lecture&summary_type=short",
        PHOTOSYNTHESIS_NOTES.replace(' ', "+")
    );
    let request = Request::builder()
        .method("POST")
        .uri("/summarize_raw")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();

    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["summary_id"].as_str().unwrap().starts_with("text_Lecture_short_"));
}

#[tokio::test]
async fn given_pdf_uploads_when_uploading_then_summarizes_extracted_text() {
    let app = create_test_app();
    let request = multipart_request(
        "/upload_pdf",
        &[("user_id", "student-1"), ("title", "Week 2")],
        &[("part1.pdf", PHOTOSYNTHESIS_NOTES)],
    );

    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["note_id"], "pdf_Week_2");
}

#[tokio::test]
async fn given_unreadable_images_when_uploading_then_no_text_rejection() {
    let loader = MockFileLoader::new().failing_on("scan.png", "ocr failed");
    let app = create_test_app_with(Arc::new(EchoSummarizer), Arc::new(loader));
    let request = multipart_request(
        "/upload_images",
        &[("user_id", "student-1"), ("title", "Scans")],
        &[("scan.png", "pixels")],
    );

    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "error": "No text extracted from images.", "success": false })
    );
}

#[tokio::test]
async fn given_upload_without_files_when_uploading_then_bad_request() {
    let app = create_test_app();
    let request = multipart_request(
        "/upload_pdf",
        &[("user_id", "student-1"), ("title", "Week 2")],
        &[],
    );

    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file uploaded");
}

#[tokio::test]
async fn given_saved_summary_when_deleting_then_note_goes_too() {
    let app = create_test_app();
    let (_, saved) = send(
        &app,
        json_request(
            "POST",
            "/summarize_text",
            summarize_body("Chapter 1", PHOTOSYNTHESIS_NOTES),
        ),
    )
    .await;
    let summary_id = saved["summary_id"].as_str().unwrap();

    let (status, json) = send(
        &app,
        empty_request("DELETE", &format!("/delete_summary/student-1/{summary_id}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Deleted");
    assert_eq!(json["note_id"], "text_Chapter_1");

    let (_, again) = send(
        &app,
        json_request(
            "POST",
            "/summarize_text",
            summarize_body("Chapter 1", PHOTOSYNTHESIS_NOTES),
        ),
    )
    .await;
    assert_eq!(again["success"], true);
}

#[tokio::test]
async fn given_unknown_summary_when_deleting_then_not_found() {
    let app = create_test_app();

    let (status, json) = send(&app, empty_request("DELETE", "/delete_summary/student-1/missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "success": false, "message": "Summary not found" }));
}

#[tokio::test]
async fn given_photosynthesis_text_when_generating_flashcards_then_three_cards() {
    let app = create_test_app();
    let body = json!({
        "content": "Photosynthesis is the process by which plants convert light into energy. Chlorophyll absorbs sunlight. This process produces oxygen as a byproduct.",
        "user_id": "student-1",
        "set_name": "Biology",
        "num_flashcards": 3
    });

    let (status, json) = send(&app, json_request("POST", "/generate_flashcards", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 3);
    assert_eq!(json["flashcards"][0]["question"], "What is Photosynthesis?");
    assert_eq!(
        json["flashcards"][0]["answer"],
        "Photosynthesis is the process by which plants convert light into energy."
    );
    assert!(json["set_id"].as_str().unwrap().starts_with("flashcard_set_Biology_"));
}

#[tokio::test]
async fn given_short_content_when_generating_flashcards_then_rejected() {
    let app = create_test_app();
    let body = json!({ "content": "Too short.", "user_id": "student-1", "set_name": "Biology" });

    let (status, json) = send(&app, json_request("POST", "/generate_flashcards", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "error": "Content too short for flashcard generation.", "success": false })
    );
}

#[tokio::test]
async fn given_flashcard_set_when_running_crud_then_each_step_is_visible() {
    let app = create_test_app();
    let create = json!({
        "user_id": "student-1",
        "set_name": "Deck",
        "note_id": "text_Chapter_1",
        "note_title": "Chapter 1",
        "flashcards": [
            { "question": "What is ATP?", "answer": "The energy currency of the cell." },
            { "question": "What is DNA?", "answer": "The molecule carrying genetic code." }
        ]
    });
    let (status, created) = send(&app, json_request("POST", "/create_flashcard_set", create)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["count"], 2);
    let set_id = created["set_id"].as_str().unwrap().to_string();
    let set_uri = format!("/flashcard_set/student-1/{set_id}");

    let (_, listed) = send(&app, empty_request("GET", "/flashcard_sets/student-1")).await;
    assert_eq!(listed["sets"].as_array().unwrap().len(), 1);
    assert_eq!(listed["sets"][0]["id"], set_id.as_str());
    assert_eq!(listed["sets"][0]["flashcardCount"], 2);
    assert_eq!(listed["sets"][0]["noteTitle"], "Chapter 1");

    let (_, detail) = send(&app, empty_request("GET", &set_uri)).await;
    assert_eq!(detail["name"], "Deck");
    assert!(detail["flashcards"][0]["id"].as_str().unwrap().starts_with("card_0_"));

    let replacement = json!([
        { "id": "card_0_old", "question": "What is RNA?", "answer": "A single stranded nucleic acid." }
    ]);
    let (status, updated) = send(&app, json_request("PUT", &set_uri, replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "success": true, "message": "Updated" }));

    let (_, detail) = send(&app, empty_request("GET", &set_uri)).await;
    assert_eq!(detail["flashcards"].as_array().unwrap().len(), 1);
    assert_eq!(detail["flashcards"][0]["question"], "What is RNA?");

    let (status, deleted) = send(&app, empty_request("DELETE", &set_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Deleted");

    let (status, missing) = send(&app, empty_request("GET", &set_uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "Flashcard set not found");
}

#[tokio::test]
async fn given_other_users_set_when_fetching_then_not_found() {
    let app = create_test_app();
    let create = json!({
        "user_id": "alice",
        "set_name": "Deck",
        "flashcards": [{ "question": "What is ATP?", "answer": "The energy currency of the cell." }]
    });
    let (_, created) = send(&app, json_request("POST", "/create_flashcard_set", create)).await;
    let set_id = created["set_id"].as_str().unwrap();

    let (status, _) = send(&app, empty_request("GET", &format!("/flashcard_set/bob/{set_id}"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_blank_answer_when_updating_set_then_bad_request() {
    let app = create_test_app();
    let create = json!({
        "user_id": "student-1",
        "set_name": "Deck",
        "flashcards": [{ "question": "What is ATP?", "answer": "The energy currency of the cell." }]
    });
    let (_, created) = send(&app, json_request("POST", "/create_flashcard_set", create)).await;
    let set_uri = format!("/flashcard_set/student-1/{}", created["set_id"].as_str().unwrap());

    let replacement = json!([{ "question": "What is RNA?", "answer": " " }]);
    let (status, body) = send(&app, json_request("PUT", &set_uri, replacement)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Flashcard 0 needs both a question and an answer.");

    let (_, detail) = send(&app, empty_request("GET", &set_uri)).await;
    assert_eq!(detail["flashcards"][0]["question"], "What is ATP?");
}
