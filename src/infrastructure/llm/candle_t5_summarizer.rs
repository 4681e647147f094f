use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config as T5Config, T5ForConditionalGeneration};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Semaphore;

use crate::application::ports::{GenerationRequest, Summarizer, SummarizerError};

const REPEAT_LAST_N: usize = 64;

#[derive(Debug, Clone)]
pub struct T5Options {
    pub max_input_tokens: usize,
    pub repeat_penalty: f32,
    /// Concurrent inference calls; 0 means one per available core.
    pub max_concurrency: usize,
}

impl Default for T5Options {
    fn default() -> Self {
        Self {
            max_input_tokens: 512,
            repeat_penalty: 1.05,
            max_concurrency: 0,
        }
    }
}

/// Weights loaded once; each call works on its own clone so the decoder
/// KV cache never crosses requests.
struct LoadedT5 {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    decoder_start_token_id: u32,
    eos_token_id: u32,
}

/// Local seq2seq backend. Inference runs on the blocking pool, bounded by
/// a semaphore.
pub struct CandleT5Summarizer {
    inner: Arc<LoadedT5>,
    options: T5Options,
    permits: Arc<Semaphore>,
}

impl CandleT5Summarizer {
    pub fn load(model_id: &str, options: T5Options) -> Result<Self, SummarizerError> {
        let device = Device::Cpu;

        tracing::info!(model = model_id, "Loading local T5 summarization model");

        let api = Api::new().map_err(|e| SummarizerError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("model.safetensors: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("read config: {}", e)))?;
        let mut config: T5Config = serde_json::from_str(&config_contents)
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("parse config: {}", e)))?;
        config.use_cache = true;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| SummarizerError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("model: {}", e)))?;

        let concurrency = if options.max_concurrency == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            options.max_concurrency
        };

        tracing::info!(concurrency, "T5 model loaded");

        Ok(Self {
            inner: Arc::new(LoadedT5 {
                model,
                tokenizer,
                device,
                decoder_start_token_id: config
                    .decoder_start_token_id
                    .unwrap_or(config.pad_token_id) as u32,
                eos_token_id: config.eos_token_id as u32,
            }),
            options,
            permits: Arc::new(Semaphore::new(concurrency)),
        })
    }

    /// The tokenizer the model was trained with, for chunk budgeting.
    pub fn tokenizer(&self) -> Tokenizer {
        self.inner.tokenizer.clone()
    }
}

impl LoadedT5 {
    fn generate(
        &self,
        prompt: &str,
        min_length: usize,
        max_length: usize,
        options: &T5Options,
    ) -> Result<String, SummarizerError> {
        let mut input_ids = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| SummarizerError::InferenceFailed(format!("tokenization: {}", e)))?
            .get_ids()
            .to_vec();
        if input_ids.len() > options.max_input_tokens {
            input_ids.truncate(options.max_input_tokens.saturating_sub(1));
            input_ids.push(self.eos_token_id);
        }

        let mut model = self.model.clone();
        let output_ids = self
            .decode_greedy(&mut model, &input_ids, min_length, max_length, options)
            .map_err(|e| SummarizerError::InferenceFailed(e.to_string()))?;

        self.tokenizer
            .decode(&output_ids, true)
            .map_err(|e| SummarizerError::InferenceFailed(format!("detokenization: {}", e)))
    }

    fn decode_greedy(
        &self,
        model: &mut T5ForConditionalGeneration,
        input_ids: &[u32],
        min_length: usize,
        max_length: usize,
        options: &T5Options,
    ) -> candle_core::Result<Vec<u32>> {
        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = model.encode(&input)?;

        let mut generated: Vec<u32> = Vec::new();
        let mut last_token = self.decoder_start_token_id;

        while generated.len() < max_length {
            let decoder_input = Tensor::new(&[last_token], &self.device)?.unsqueeze(0)?;
            let logits = model
                .decode(&decoder_input, &encoder_output)?
                .squeeze(0)?
                .to_dtype(DType::F32)?;

            let logits = if options.repeat_penalty == 1.0 || generated.is_empty() {
                logits
            } else {
                let start_at = generated.len().saturating_sub(REPEAT_LAST_N);
                candle_transformers::utils::apply_repeat_penalty(
                    &logits,
                    options.repeat_penalty,
                    &generated[start_at..],
                )?
            };

            let mut scores: Vec<f32> = logits.to_vec1()?;
            if generated.len() < min_length {
                if let Some(score) = scores.get_mut(self.eos_token_id as usize) {
                    *score = f32::NEG_INFINITY;
                }
            }

            let next = argmax(&scores);
            if next == self.eos_token_id {
                break;
            }
            generated.push(next);
            last_token = next;
        }

        Ok(generated)
    }
}

fn argmax(scores: &[f32]) -> u32 {
    scores
        .iter()
        .enumerate()
        .fold((0usize, f32::NEG_INFINITY), |best, (i, &s)| {
            if s > best.1 { (i, s) } else { best }
        })
        .0 as u32
}

#[async_trait]
impl Summarizer for CandleT5Summarizer {
    #[tracing::instrument(skip(self, request), fields(min = request.min_length, max = request.max_length))]
    async fn generate(&self, request: GenerationRequest) -> Result<String, SummarizerError> {
        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| SummarizerError::InferenceFailed(e.to_string()))?;

        let inner = Arc::clone(&self.inner);
        let options = self.options.clone();
        let prompt = request.prompt();

        tokio::task::spawn_blocking(move || {
            inner.generate(&prompt, request.min_length, request.max_length, &options)
        })
        .await
        .map_err(|e| SummarizerError::InferenceFailed(format!("inference task: {}", e)))?
    }
}
