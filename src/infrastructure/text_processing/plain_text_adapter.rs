use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const UTF8_BOM: &str = "\u{feff}";

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let text = std::str::from_utf8(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }
        Ok(text.to_string())
    }
}
