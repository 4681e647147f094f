use async_trait::async_trait;

/// One call into the text-generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub text: String,
    /// Lower bound on generated tokens.
    pub min_length: usize,
    /// Upper bound on generated tokens.
    pub max_length: usize,
}

impl GenerationRequest {
    pub fn new(instruction: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            text: text.into(),
            min_length: 0,
            max_length: 512,
        }
    }

    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length.min(max_length);
        self.max_length = max_length;
        self
    }

    /// Instruction and text as a single prompt, for backends without roles.
    pub fn prompt(&self) -> String {
        format!("{}{}", self.instruction, self.text)
    }
}

/// Abstractive text generation backend shared by summaries and flashcards.
///
/// Implementations are loaded once per process and must not block the
/// calling task; CPU/GPU-bound work belongs on a blocking pool.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, SummarizerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("model load failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
