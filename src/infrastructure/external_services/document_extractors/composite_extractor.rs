use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::{HtmlExtractor, PdfExtractor, PlainTextExtractor};
use crate::application::ports::document_extractor::{DocumentExtractionError, DocumentExtractor};
use crate::domain::entities::UploadedFile;

static TRAILING_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid trailing whitespace regex"));
static BLANK_LINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

/// Picks a format extractor from the declared content type, falling back to
/// the filename extension when the client sent no useful type.
pub struct CompositeDocumentExtractor {
    text_extractor: Arc<PlainTextExtractor>,
    html_extractor: Arc<HtmlExtractor>,
    pdf_extractor: Arc<PdfExtractor>,
}

impl CompositeDocumentExtractor {
    pub fn new() -> Self {
        Self {
            text_extractor: Arc::new(PlainTextExtractor::new()),
            html_extractor: Arc::new(HtmlExtractor::new()),
            pdf_extractor: Arc::new(PdfExtractor::new()),
        }
    }

    fn get_extractor_for_type(&self, file_type: &str) -> Option<Arc<dyn DocumentExtractor>> {
        if self.text_extractor.can_extract(file_type) {
            Some(self.text_extractor.clone())
        } else if self.html_extractor.can_extract(file_type) {
            Some(self.html_extractor.clone())
        } else if self.pdf_extractor.can_extract(file_type) {
            Some(self.pdf_extractor.clone())
        } else {
            None
        }
    }

    /// Effective MIME type of an upload, without parameters such as charset.
    fn resolve_file_type(&self, file: &UploadedFile) -> Option<String> {
        let declared = file
            .content_type()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_lowercase())
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

        declared.or_else(|| detect_file_type_from_extension(file))
    }
}

impl Default for CompositeDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_file_type_from_extension(file: &UploadedFile) -> Option<String> {
    let file_type = match file.extension()?.as_str() {
        "txt" | "text" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "xhtml" => "application/xhtml+xml",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(file_type.to_string())
}

fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = TRAILING_SPACES.replace_all(&text, "\n");
    BLANK_LINE_RUNS.replace_all(&text, "\n\n").into_owned()
}

#[async_trait]
impl DocumentExtractor for CompositeDocumentExtractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, DocumentExtractionError> {
        if file.is_empty() {
            return Ok(String::new());
        }

        let file_type = self.resolve_file_type(file).ok_or_else(|| {
            DocumentExtractionError::UnsupportedFormat(format!(
                "cannot determine type of {}",
                file.filename()
            ))
        })?;

        let extractor = self
            .get_extractor_for_type(&file_type)
            .ok_or_else(|| DocumentExtractionError::UnsupportedFormat(file_type.clone()))?;

        let text = extractor.extract_text(file).await?;
        Ok(normalize_text(&text))
    }

    fn media_types(&self) -> Vec<&'static str> {
        let mut types = self.text_extractor.media_types();
        types.extend(self.html_extractor.media_types());
        types.extend(self.pdf_extractor.media_types());
        types
    }

    fn can_extract(&self, file_type: &str) -> bool {
        self.get_extractor_for_type(file_type).is_some()
    }
}
