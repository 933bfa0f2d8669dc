use async_trait::async_trait;
use html2text::from_read;

use crate::application::ports::document_extractor::{DocumentExtractionError, DocumentExtractor};
use crate::domain::entities::UploadedFile;

// Line width html2text wraps at
const TEXT_WIDTH: usize = 80;

pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_from_html_content(&self, html_content: &str) -> Result<String, DocumentExtractionError> {
        from_read(html_content.as_bytes(), TEXT_WIDTH).map_err(|e| {
            DocumentExtractionError::ExtractionFailed(format!(
                "Failed to convert HTML to text: {}",
                e
            ))
        })
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for HtmlExtractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, DocumentExtractionError> {
        let html_content = std::str::from_utf8(file.data()).map_err(|e| {
            DocumentExtractionError::CorruptedFile(format!("Invalid UTF-8: {}", e))
        })?;

        self.extract_from_html_content(html_content)
    }

    fn media_types(&self) -> Vec<&'static str> {
        vec!["text/html", "application/html", "application/xhtml+xml"]
    }
}
