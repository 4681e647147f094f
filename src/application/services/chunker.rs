use std::ops::Range;
use std::sync::Arc;

use crate::application::ports::{TextTokenizer, TokenizerError};

/// Token-bounded sliding windows sized to the backend's context.
pub struct Chunker {
    tokenizer: Arc<dyn TextTokenizer>,
    max_tokens: usize,
    overlap_tokens: usize,
}

impl Chunker {
    pub fn new(tokenizer: Arc<dyn TextTokenizer>, max_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            tokenizer,
            max_tokens: max_tokens.max(1),
            overlap_tokens,
        }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Text within budget comes back untouched as the only chunk.
    pub fn chunk(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        let ids = self.tokenizer.encode(text)?;
        if ids.len() <= self.max_tokens {
            return Ok(vec![text.to_string()]);
        }

        token_windows(ids.len(), self.max_tokens, self.overlap_tokens)
            .into_iter()
            .map(|window| self.tokenizer.decode(&ids[window]))
            .collect()
    }
}

/// Window ranges over `total` tokens, advancing by `max_tokens - overlap_tokens`.
/// Stops at the first window that reaches the end; the last may be shorter.
pub fn token_windows(total: usize, max_tokens: usize, overlap_tokens: usize) -> Vec<Range<usize>> {
    let max_tokens = max_tokens.max(1);
    let step = if max_tokens > overlap_tokens {
        max_tokens - overlap_tokens
    } else {
        max_tokens
    };

    let mut windows = Vec::new();
    let mut start = 0;

    while start < total {
        let end = (start + max_tokens).min(total);
        windows.push(start..end);
        if end == total {
            break;
        }
        start += step;
    }

    windows
}
