use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;
use unicode_normalization::UnicodeNormalization;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

pub struct PdfAdapter {
    timeout: Duration,
}

impl PdfAdapter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Text of every page that has any, NFKC-normalized so ligatures come
    /// back as plain letters.
    fn extract_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) => {
                    let normalized: String = text.nfkc().collect();
                    let normalized = normalized.trim();
                    if !normalized.is_empty() {
                        pages.push(normalized.to_string());
                    }
                }
                Err(e) => tracing::warn!(page = page_index + 1, error = %e, "Page extraction failed"),
            }
        }

        Ok(pages)
    }
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename, bytes = data.len()))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;
        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(pages = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(pages.join("\n\n"))
    }
}
