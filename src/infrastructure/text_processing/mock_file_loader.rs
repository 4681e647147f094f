use std::collections::HashMap;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::Document;

/// Treats every upload as UTF-8 text, except filenames registered as
/// unreadable, which fail the way a broken scan would.
#[derive(Default)]
pub struct MockFileLoader {
    failures: HashMap<String, String>,
}

impl MockFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, filename: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(filename.into(), reason.into());
        self
    }
}

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8], doc: &Document) -> Result<String, FileLoaderError> {
        if let Some(reason) = self.failures.get(&doc.filename) {
            return Err(FileLoaderError::ExtractionFailed(reason.clone()));
        }

        let text = String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(doc.filename.clone()));
        }
        Ok(text)
    }
}
