use crate::application::ports::{TextTokenizer, TokenizerError};

/// BPE tokenizer for OpenAI-compatible backends.
pub struct TiktokenTokenizer {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenTokenizer {
    pub fn cl100k() -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| TokenizerError::LoadFailed(format!("cl100k_base: {}", e)))?;
        Ok(Self { bpe })
    }

    /// Falls back to `cl100k_base` for model names tiktoken does not know.
    pub fn for_model(model: &str) -> Result<Self, TokenizerError> {
        match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => Ok(Self { bpe }),
            Err(e) => {
                tracing::debug!(model, error = %e, "Unknown tiktoken model, using cl100k_base");
                Self::cl100k()
            }
        }
    }
}

impl TextTokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        Ok(self
            .bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|t| t as u32)
            .collect())
    }

    /// A window may cut a multi-byte character at either edge; the partial
    /// bytes are dropped there, and the neighbouring window's overlap holds
    /// the whole character.
    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        let tokens: Vec<usize> = ids.iter().map(|&t| t as usize).collect();
        let bytes = self.bpe._decode_native(&tokens);
        let text = String::from_utf8_lossy(&bytes);
        Ok(text
            .trim_matches(char::REPLACEMENT_CHARACTER)
            .to_string())
    }
}
