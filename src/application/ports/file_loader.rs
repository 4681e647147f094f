use async_trait::async_trait;

use crate::domain::Document;

/// Turns an uploaded PDF, image or text file into plain text for summarizing.
#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Fails with `NoTextFound` rather than returning an empty string.
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    /// The file was readable but held no text (blank scan, image-only PDF).
    #[error("no text found in {0}")]
    NoTextFound(String),
}
