/// Tokenizer paired with the active backend; chunk budgets are counted in its tokens.
pub trait TextTokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError>;

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError>;

    fn count(&self, text: &str) -> Result<usize, TokenizerError> {
        self.encode(text).map(|ids| ids.len())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("tokenizer load failed: {0}")]
    LoadFailed(String),
    #[error("encoding failed: {0}")]
    EncodeFailed(String),
    #[error("decoding failed: {0}")]
    DecodeFailed(String),
}
