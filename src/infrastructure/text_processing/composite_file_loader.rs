use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::{PdfAdapter, PlainTextAdapter, TesseractImageAdapter};

/// Routes each document to the loader registered for its content type.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// PDF text layer, tesseract OCR for images and UTF-8 plain text.
    pub fn standard(tesseract_command: &str, timeout: Duration) -> Self {
        Self::new(vec![
            (ContentType::Pdf, Arc::new(PdfAdapter::new(timeout))),
            (
                ContentType::Image,
                Arc::new(TesseractImageAdapter::new(tesseract_command, timeout)),
            ),
            (ContentType::Text, Arc::new(PlainTextAdapter)),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}
