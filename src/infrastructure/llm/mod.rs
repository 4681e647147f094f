mod candle_t5_summarizer;
mod hf_text_tokenizer;
mod mock_summarizer;
mod openai_summarizer;
mod summarizer_factory;
mod tiktoken_tokenizer;

pub use candle_t5_summarizer::{CandleT5Summarizer, T5Options};
pub use hf_text_tokenizer::HfTextTokenizer;
pub use mock_summarizer::{EchoSummarizer, FailingSummarizer, ScriptedSummarizer, WordTokenizer};
pub use openai_summarizer::OpenAiSummarizer;
pub use summarizer_factory::{SummarizerBackend, SummarizerFactory, SummarizerFactoryError};
pub use tiktoken_tokenizer::TiktokenTokenizer;
