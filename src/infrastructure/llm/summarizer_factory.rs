use std::sync::Arc;

use crate::application::ports::{Summarizer, TextTokenizer};
use crate::presentation::config::{SummarizerProvider, SummarizerSettings};

use super::{CandleT5Summarizer, HfTextTokenizer, OpenAiSummarizer, T5Options, TiktokenTokenizer};

/// A backend together with the tokenizer its chunk budgets are counted in.
pub struct SummarizerBackend {
    pub summarizer: Arc<dyn Summarizer>,
    pub tokenizer: Arc<dyn TextTokenizer>,
}

pub struct SummarizerFactory;

#[derive(Debug, thiserror::Error)]
pub enum SummarizerFactoryError {
    #[error("missing API key: the openai summarizer requires summarizer.api_key")]
    MissingApiKey,
    #[error("backend initialization failed: {0}")]
    InitializationFailed(String),
}

impl SummarizerFactory {
    pub fn create(settings: &SummarizerSettings) -> Result<SummarizerBackend, SummarizerFactoryError> {
        match settings.provider {
            SummarizerProvider::Local => {
                let summarizer = CandleT5Summarizer::load(
                    &settings.model,
                    T5Options {
                        max_input_tokens: settings.max_input_tokens,
                        repeat_penalty: settings.repeat_penalty,
                        max_concurrency: settings.max_concurrency,
                    },
                )
                .map_err(|e| SummarizerFactoryError::InitializationFailed(e.to_string()))?;
                let tokenizer = HfTextTokenizer::new(summarizer.tokenizer());

                Ok(SummarizerBackend {
                    summarizer: Arc::new(summarizer),
                    tokenizer: Arc::new(tokenizer),
                })
            }
            SummarizerProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or(SummarizerFactoryError::MissingApiKey)?;
                tracing::info!(model = %settings.model, base_url = %settings.base_url, "Using OpenAI-compatible summarizer");

                let tokenizer = TiktokenTokenizer::for_model(&settings.model)
                    .map_err(|e| SummarizerFactoryError::InitializationFailed(e.to_string()))?;

                Ok(SummarizerBackend {
                    summarizer: Arc::new(OpenAiSummarizer::new(
                        settings.base_url.clone(),
                        key,
                        settings.model.clone(),
                        settings.temperature,
                    )),
                    tokenizer: Arc::new(tokenizer),
                })
            }
        }
    }
}
