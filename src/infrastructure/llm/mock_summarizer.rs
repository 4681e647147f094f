use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{GenerationRequest, Summarizer, SummarizerError, TextTokenizer, TokenizerError};

/// Returns the request text unchanged.
pub struct EchoSummarizer;

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn generate(&self, request: GenerationRequest) -> Result<String, SummarizerError> {
        Ok(request.text)
    }
}

/// Plays back queued responses in order, then repeats the fallback.
/// Every request is recorded for inspection.
pub struct ScriptedSummarizer {
    responses: Mutex<VecDeque<Result<String, SummarizerError>>>,
    fallback: String,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl ScriptedSummarizer {
    pub fn always(response: impl Into<String>) -> Self {
        Self::new(Vec::new(), response)
    }

    pub fn new(
        responses: Vec<Result<String, SummarizerError>>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fallback: fallback.into(),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Summarizer for ScriptedSummarizer {
    async fn generate(&self, request: GenerationRequest) -> Result<String, SummarizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Always fails, as an unreachable backend would.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, SummarizerError> {
        Err(SummarizerError::InferenceFailed("backend offline".to_string()))
    }
}

/// One token per whitespace-separated word; decoding joins with spaces.
pub struct WordTokenizer {
    vocabulary: Mutex<Vec<String>>,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self {
            vocabulary: Mutex::new(Vec::new()),
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTokenizer for WordTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        let mut vocabulary = self
            .vocabulary
            .lock()
            .map_err(|e| TokenizerError::EncodeFailed(e.to_string()))?;

        Ok(text
            .split_whitespace()
            .map(|word| {
                let id = match vocabulary.iter().position(|known| known == word) {
                    Some(id) => id,
                    None => {
                        vocabulary.push(word.to_string());
                        vocabulary.len() - 1
                    }
                };
                id as u32
            })
            .collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        let vocabulary = self
            .vocabulary
            .lock()
            .map_err(|e| TokenizerError::DecodeFailed(e.to_string()))?;

        ids.iter()
            .map(|&id| {
                vocabulary
                    .get(id as usize)
                    .cloned()
                    .ok_or_else(|| TokenizerError::DecodeFailed(format!("unknown id {}", id)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|words| words.join(" "))
    }
}
