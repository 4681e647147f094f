use tokenizers::Tokenizer;

use crate::application::ports::{TextTokenizer, TokenizerError};

/// The local model's own vocabulary, so chunk budgets match what the
/// encoder actually sees.
pub struct HfTextTokenizer {
    tokenizer: Tokenizer,
}

impl HfTextTokenizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }
}

impl TextTokenizer for HfTextTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        self.tokenizer
            .encode(text, false)
            .map(|encoding| encoding.get_ids().to_vec())
            .map_err(|e| TokenizerError::EncodeFailed(e.to_string()))
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        self.tokenizer
            .decode(ids, true)
            .map_err(|e| TokenizerError::DecodeFailed(e.to_string()))
    }
}
