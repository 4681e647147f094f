use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// OCR through the `tesseract` command line tool.
pub struct TesseractImageAdapter {
    command: String,
    timeout: Duration,
}

impl TesseractImageAdapter {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    async fn run(&self, image_path: &std::path::Path) -> Result<String, FileLoaderError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.command)
                .arg(image_path)
                .arg("stdout")
                .output(),
        )
        .await
        .map_err(|_| {
            FileLoaderError::ExtractionFailed(format!(
                "{} timed out after {}s",
                self.command,
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to run {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FileLoaderError::ExtractionFailed(format!(
                "{} failed (exit {}): {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl FileLoader for TesseractImageAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename, bytes = data.len()))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Image {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let mut image_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;
        image_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let text = self.run(image_file.path()).await?;
        let text = text.trim();
        tracing::debug!(chars = text.len(), "OCR complete");

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }
        Ok(text.to_string())
    }
}
