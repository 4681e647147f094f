use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use studyai::application::ports::{GenerationRequest, Summarizer, SummarizerError, TextTokenizer};
use studyai::application::services::Chunker;
use studyai::infrastructure::llm::{
    OpenAiSummarizer, SummarizerFactory, SummarizerFactoryError, TiktokenTokenizer,
};
use studyai::presentation::SummarizerProvider;
use studyai::presentation::config::SummarizerSettings;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn given_chat_completion_when_generating_then_returns_first_choice() {
    let router = Router::new().route(
        "/chat/completions",
        post(|Json(body): Json<Value>| async move {
            let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
            let max_tokens = body["max_tokens"].as_u64().unwrap_or_default();
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": format!("{max_tokens}|{prompt}") } }]
            }))
        }),
    );
    let base_url = serve(router).await;
    let summarizer = OpenAiSummarizer::new(base_url, "sk-test".into(), "gpt-4o-mini".into(), 0.2);

    let output = summarizer
        .generate(GenerationRequest::new("Summarize: ", "cells divide").with_lengths(10, 64))
        .await
        .unwrap();

    assert_eq!(output, "64|Summarize: cells divide");
}

#[tokio::test]
async fn given_rate_limit_when_generating_then_rate_limited_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base_url = serve(router).await;
    let summarizer = OpenAiSummarizer::new(base_url, "sk-test".into(), "gpt-4o-mini".into(), 0.2);

    let result = summarizer
        .generate(GenerationRequest::new("Summarize: ", "cells divide"))
        .await;

    assert!(matches!(result, Err(SummarizerError::RateLimited)));
}

#[tokio::test]
async fn given_empty_choices_when_generating_then_invalid_response() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let base_url = serve(router).await;
    let summarizer = OpenAiSummarizer::new(base_url, "sk-test".into(), "gpt-4o-mini".into(), 0.2);

    let result = summarizer
        .generate(GenerationRequest::new("Summarize: ", "cells divide"))
        .await;

    assert!(matches!(result, Err(SummarizerError::InvalidResponse(_))));
}

#[test]
fn given_openai_provider_without_key_when_creating_backend_then_missing_api_key() {
    let settings = SummarizerSettings {
        provider: SummarizerProvider::OpenAi,
        api_key: None,
        ..SummarizerSettings::default()
    };

    let result = SummarizerFactory::create(&settings);

    assert!(matches!(result, Err(SummarizerFactoryError::MissingApiKey)));
}

#[test]
fn given_cl100k_tokenizer_when_chunking_long_text_then_every_chunk_fits_budget() {
    let tokenizer = Arc::new(TiktokenTokenizer::cl100k().unwrap());
    let chunker = Chunker::new(tokenizer.clone(), 32, 4);
    let text = "Mitochondria produce ATP through cellular respiration. ".repeat(20);

    let chunks = chunker.chunk(&text).unwrap();

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(tokenizer.encode(chunk).unwrap().len() <= 32 + 2);
    }
}

#[test]
fn given_cjk_text_when_chunking_with_cl100k_then_windows_split_on_character_edges() {
    let tokenizer = Arc::new(TiktokenTokenizer::cl100k().unwrap());
    let chunker = Chunker::new(tokenizer.clone(), 7, 2);
    let text = "光合作用是植物将光能转化为化学能的过程。叶绿素吸收阳光。".repeat(10);

    let chunks = chunker.chunk(&text).unwrap();

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(!chunk.is_empty());
        assert!(!chunk.contains(char::REPLACEMENT_CHARACTER));
        assert!(chunk.chars().count() < text.chars().count());
        assert!(text.contains(chunk.as_str()));
    }
}

#[test]
fn given_unknown_model_when_loading_tiktoken_then_falls_back_to_cl100k() {
    let tokenizer = TiktokenTokenizer::for_model("my-local-llama").unwrap();

    let ids = tokenizer.encode("hello world").unwrap();

    assert_eq!(tokenizer.decode(&ids).unwrap(), "hello world");
}
