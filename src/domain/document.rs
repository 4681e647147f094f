use super::NoteSource;

/// An uploaded file awaiting text extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Image,
    Text,
}

impl ContentType {
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Image => "image/*",
            Self::Text => "text/plain",
        }
    }
}

/// Upload routes decide how a file is read, whatever MIME type the client sent.
impl From<NoteSource> for ContentType {
    fn from(source: NoteSource) -> Self {
        match source {
            NoteSource::Pdf => Self::Pdf,
            NoteSource::Image => Self::Image,
            NoteSource::Text => Self::Text,
        }
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType) -> Self {
        Self {
            filename,
            content_type,
        }
    }
}
