use async_trait::async_trait;
use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::warn;

use crate::application::ports::document_extractor::{DocumentExtractionError, DocumentExtractor};
use crate::domain::entities::UploadedFile;

#[derive(Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pdf_text(data: &[u8]) -> Result<String, DocumentExtractionError> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

        // Uploads carry no password, so only PDFs with an empty user password open
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|_e| {
                DocumentExtractionError::ExtractionFailed(
                    "PDF is password protected".to_string(),
                )
            })?;
        }

        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();

        // Pages are independent, so extract them in parallel and restore order afterwards
        let mut extracted_pages: Vec<(u32, Result<Vec<String>, String>)> = page_numbers
            .into_par_iter()
            .map(|page_num| {
                let lines = doc
                    .extract_text(&[page_num])
                    .map(|text| {
                        text.split('\n')
                            .map(|s| s.trim_end().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .map_err(|e| format!("Failed to extract text from page {}: {}", page_num, e));
                (page_num, lines)
            })
            .collect();
        extracted_pages.sort_by_key(|(page_num, _)| *page_num);

        let mut all_text = Vec::new();
        for (page_num, page_result) in extracted_pages {
            match page_result {
                Ok(lines) => all_text.extend(lines),
                Err(e) => warn!("Skipping PDF page {}: {}", page_num, e),
            }
        }

        let combined_text = all_text.join("\n");
        if combined_text.trim().is_empty() {
            warn!("No text layer found in PDF, it may be a scanned document");
        }

        Ok(combined_text)
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, DocumentExtractionError> {
        let data = file.data().to_vec();

        tokio::task::spawn_blocking(move || Self::extract_pdf_text(&data))
            .await
            .map_err(|e| DocumentExtractionError::ExtractionFailed(e.to_string()))?
    }

    fn media_types(&self) -> Vec<&'static str> {
        vec!["application/pdf"]
    }
}
