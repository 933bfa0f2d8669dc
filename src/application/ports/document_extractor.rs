use async_trait::async_trait;

use crate::domain::entities::{TextChunk, UploadedFile};

#[derive(Debug)]
pub enum DocumentExtractionError {
    UnsupportedFormat(String),
    CorruptedFile(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for DocumentExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentExtractionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {}", format)
            }
            DocumentExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            DocumentExtractionError::ExtractionFailed(msg) => {
                write!(f, "Extraction failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DocumentExtractionError {}

/// Turns the raw bytes of an uploaded file into plain text.
///
/// Implementations see the file as received: the declared content type may
/// be missing or wrong, and an empty byte buffer is valid input.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, DocumentExtractionError>;

    /// Lowercase media types this extractor handles.
    fn media_types(&self) -> Vec<&'static str>;

    fn can_extract(&self, media_type: &str) -> bool {
        let media_type = media_type.to_ascii_lowercase();
        self.media_types().contains(&media_type.as_str())
    }
}

/// Splits extracted text into ordered chunks. Empty text yields no chunks.
pub trait TextChunker: Send + Sync {
    fn chunk_text(&self, text: &str) -> Vec<TextChunk>;
}
