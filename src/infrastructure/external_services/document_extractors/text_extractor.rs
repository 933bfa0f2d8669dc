use async_trait::async_trait;

use crate::application::ports::document_extractor::{DocumentExtractionError, DocumentExtractor};
use crate::domain::entities::UploadedFile;

const SUPPORTED_TYPES: &[&str] = &[
    "text/plain",
    "text/markdown",
    "text/x-markdown",
    "text/csv",
    "application/json",
];

pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, DocumentExtractionError> {
        let text = std::str::from_utf8(file.data()).map_err(|e| {
            DocumentExtractionError::CorruptedFile(format!("Invalid UTF-8: {}", e))
        })?;

        // Strip a leading byte order mark
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }

    fn media_types(&self) -> Vec<&'static str> {
        SUPPORTED_TYPES.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extracts_utf8_text() {
        let extractor = PlainTextExtractor::new();
        let file = UploadedFile::new(
            "notes.md".to_string(),
            Some("text/markdown".to_string()),
            "\u{feff}# Title\n\nBody".as_bytes().to_vec(),
        );

        let text = extractor.extract_text(&file).await.unwrap();
        assert_eq!(text, "# Title\n\nBody");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_corrupted() {
        let extractor = PlainTextExtractor::new();
        let file = UploadedFile::new("bad.txt".to_string(), None, vec![0xc3, 0x28]);

        let result = extractor.extract_text(&file).await;
        assert!(matches!(result, Err(DocumentExtractionError::CorruptedFile(_))));
    }

    #[test]
    fn test_can_extract() {
        let extractor = PlainTextExtractor::new();
        assert!(extractor.can_extract("text/plain"));
        assert!(extractor.can_extract("TEXT/CSV"));
        assert!(!extractor.can_extract("application/pdf"));
    }
}
