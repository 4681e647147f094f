use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::application::ports::{GenerationRequest, Summarizer, SummarizerError};
use crate::domain::SummaryType;
use crate::infrastructure::observability::preview;

use super::chunker::Chunker;
use super::section_splitter::split_sections;
use super::text_cleaning::{
    collapse_whitespace, ensure_period, ensure_terminated, leading_sentences, normalize_text,
    strip_boilerplate, trim_trailing_fragment, word_count,
};

pub const SUMMARY_INSTRUCTION: &str = "Write an academic abstract that keeps concrete examples, \
technical measures and equity concerns in a scholarly tone:\n";

static HOTLINE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)for confidential support.*").unwrap());
static INSTRUCTION_ECHO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)write an academic abstract.*?in a (?:scholarly|academic) tone:").unwrap()
});
static DOUBLE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^.])\.\.([^.]|$)").unwrap());
static REPEATED_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Knobs of the summarization pipeline.
#[derive(Debug, Clone)]
pub struct SummarizationPolicy {
    /// Target summary length as a fraction of chunk words (detailed summaries).
    pub output_ratio: f32,
    /// Floor on the per-chunk target word count (detailed summaries).
    pub min_target_words: usize,
    /// Backend tokens per target word.
    pub token_scale: f32,
    pub max_output_tokens: usize,
    /// `min_length` as a fraction of `max_length`.
    pub min_length_fraction: f32,
    pub min_input_words: usize,
    pub min_summary_words: usize,
    pub fallback_sentences: usize,
}

impl Default for SummarizationPolicy {
    fn default() -> Self {
        Self {
            output_ratio: 0.45,
            min_target_words: 30,
            token_scale: 1.5,
            max_output_tokens: 1000,
            min_length_fraction: 0.6,
            min_input_words: 10,
            min_summary_words: 20,
            fallback_sentences: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthPolicy {
    pub output_ratio: f32,
    pub min_target_words: usize,
}

impl SummarizationPolicy {
    pub fn length_policy(&self, summary_type: SummaryType) -> LengthPolicy {
        match summary_type {
            SummaryType::Short => LengthPolicy {
                output_ratio: 0.20,
                min_target_words: 20,
            },
            SummaryType::Medium => LengthPolicy {
                output_ratio: 0.30,
                min_target_words: 25,
            },
            SummaryType::Detailed => LengthPolicy {
                output_ratio: self.output_ratio,
                min_target_words: self.min_target_words,
            },
            SummaryType::Academic => LengthPolicy {
                output_ratio: 0.50,
                min_target_words: 40,
            },
        }
    }

    /// `(min_length, max_length)` in backend tokens for a chunk of `chunk_words` words.
    pub fn token_window(&self, length: LengthPolicy, chunk_words: usize) -> (usize, usize) {
        let target_words =
            ((chunk_words as f32 * length.output_ratio) as usize).max(length.min_target_words);
        let max_length =
            ((target_words as f32 * self.token_scale) as usize).min(self.max_output_tokens);
        let min_length = (max_length as f32 * self.min_length_fraction) as usize;
        (min_length, max_length)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Generated(String),
    /// The model output failed the quality gate; this is the opening of the input.
    Fallback(String),
    /// Nothing left after boilerplate removal.
    EmptyContent,
    TooShort { word_count: usize },
    Unavailable,
}

impl SummaryOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Generated(text) | SummaryOutcome::Fallback(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizationError {
    #[error("summarization backend failed on all {attempted} chunks")]
    BackendUnavailable { attempted: usize },
}

#[derive(Debug, Default)]
struct SectionSummary {
    text: String,
    attempted: usize,
    succeeded: usize,
}

pub struct SummarizationService {
    summarizer: Arc<dyn Summarizer>,
    chunker: Chunker,
    policy: SummarizationPolicy,
    instruction: String,
}

impl SummarizationService {
    pub fn new(summarizer: Arc<dyn Summarizer>, chunker: Chunker, policy: SummarizationPolicy) -> Self {
        Self {
            summarizer,
            chunker,
            policy,
            instruction: SUMMARY_INSTRUCTION.to_string(),
        }
    }

    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn summarize(
        &self,
        text: &str,
        summary_type: SummaryType,
    ) -> Result<SummaryOutcome, SummarizationError> {
        tracing::debug!(raw = %preview(text), "Raw input text");

        let normalized = normalize_text(text);
        let flattened = collapse_whitespace(&normalized);
        tracing::debug!(cleaned = %preview(&flattened), "Cleaned input text");

        if flattened.is_empty() {
            return Ok(SummaryOutcome::EmptyContent);
        }

        let words = word_count(&flattened);
        if words < self.policy.min_input_words {
            tracing::info!(word_count = words, "Input too short to summarize");
            return Ok(SummaryOutcome::TooShort { word_count: words });
        }

        let sections = split_sections(&normalized);
        tracing::debug!(sections = sections.len(), "Detected sections");

        let length = self.policy.length_policy(summary_type);
        let section_summaries = futures::future::join_all(
            sections
                .iter()
                .enumerate()
                .map(|(index, section)| self.summarize_section(index, section, length)),
        )
        .await;

        let attempted: usize = section_summaries.iter().map(|s| s.attempted).sum();
        let succeeded: usize = section_summaries.iter().map(|s| s.succeeded).sum();
        if succeeded == 0 {
            tracing::error!(attempted, "Every chunk failed to summarize");
            return Err(SummarizationError::BackendUnavailable { attempted });
        }

        let combined = section_summaries
            .iter()
            .map(|s| s.text.as_str())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let summary = self.post_process(&combined);

        if word_count(&summary) >= self.policy.min_summary_words {
            tracing::info!(
                words = word_count(&summary),
                chunks = succeeded,
                "Summary generated"
            );
            return Ok(SummaryOutcome::Generated(summary));
        }

        tracing::warn!(
            words = word_count(&summary),
            "Generated summary too short, falling back to leading sentences"
        );
        match leading_sentences(&flattened, self.policy.fallback_sentences) {
            Some(fallback) => Ok(SummaryOutcome::Fallback(fallback)),
            None => Ok(SummaryOutcome::Unavailable),
        }
    }

    async fn summarize_section(
        &self,
        index: usize,
        section: &str,
        length: LengthPolicy,
    ) -> SectionSummary {
        let chunks = match self.chunker.chunk(section) {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!(section = index, error = %e, "Chunking failed, using section as one chunk");
                vec![section.to_string()]
            }
        };

        let mut result = SectionSummary::default();
        let mut pieces = Vec::with_capacity(chunks.len());

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let chunk = collapse_whitespace(chunk);
            let (min_length, max_length) = self.policy.token_window(length, word_count(&chunk));
            let request = GenerationRequest::new(self.instruction.clone(), chunk)
                .with_lengths(min_length, max_length);

            result.attempted += 1;
            match self.summarizer.generate(request).await {
                Ok(output) => {
                    result.succeeded += 1;
                    let cleaned = collapse_whitespace(&output);
                    if !cleaned.is_empty() {
                        pieces.push(ensure_period(&cleaned));
                    }
                }
                Err(e) => log_chunk_failure(index, chunk_index, &e),
            }
        }

        result.text = pieces.join(" ");
        result
    }

    fn post_process(&self, combined: &str) -> String {
        let text = HOTLINE_TAIL.replace_all(combined, "");
        let text = strip_boilerplate(&text);
        let text = REPEATED_SPACES.replace_all(&text, " ");
        let text = INSTRUCTION_ECHO.replace_all(text.trim(), "");
        let text = strip_literal_instruction(&text, &self.instruction);
        let text = DOUBLE_PERIOD.replace_all(&text, "$1.$2");
        let text = collapse_whitespace(&text);
        ensure_terminated(trim_trailing_fragment(&text))
    }
}

fn strip_literal_instruction(text: &str, instruction: &str) -> String {
    let instruction = instruction.trim();
    if instruction.is_empty() {
        return text.to_string();
    }
    match Regex::new(&format!("(?i){}", regex::escape(instruction))) {
        Ok(echo) => echo.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

fn log_chunk_failure(section: usize, chunk: usize, error: &SummarizerError) {
    tracing::warn!(section, chunk, error = %error, "Chunk summarization failed, skipping");
}
