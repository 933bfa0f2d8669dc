use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::application::ports::{DocumentExtractor, EmbeddingProvider, TextChunker};
use crate::application::ports::document_extractor::DocumentExtractionError;
use crate::application::ports::embedding_provider::EmbeddingProviderError;
use crate::domain::entities::{NewDocumentRecord, UploadedFile};
use crate::domain::repositories::DocumentRepository;
use crate::domain::repositories::document_repository::DocumentRepositoryError;

#[derive(Debug)]
pub enum IngestionError {
    ExtractionError(DocumentExtractionError),
    EmbeddingError(EmbeddingProviderError),
    StorageError(DocumentRepositoryError),
}

impl std::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionError::ExtractionError(e) => write!(f, "Extraction error: {}", e),
            IngestionError::EmbeddingError(e) => write!(f, "Embedding error: {}", e),
            IngestionError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for IngestionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestionError::ExtractionError(e) => Some(e),
            IngestionError::EmbeddingError(e) => Some(e),
            IngestionError::StorageError(e) => Some(e),
        }
    }
}

impl From<DocumentExtractionError> for IngestionError {
    fn from(error: DocumentExtractionError) -> Self {
        IngestionError::ExtractionError(error)
    }
}

impl From<EmbeddingProviderError> for IngestionError {
    fn from(error: EmbeddingProviderError) -> Self {
        IngestionError::EmbeddingError(error)
    }
}

impl From<DocumentRepositoryError> for IngestionError {
    fn from(error: DocumentRepositoryError) -> Self {
        IngestionError::StorageError(error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Stored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestResponse {
    pub status: IngestStatus,
    pub chunk_count: usize,
}

/// Extract → chunk → embed → store, for one file at a time.
///
/// Chunks are embedded and stored one by one in the order the chunker
/// produced them. The first failure aborts the run; records written before
/// it stay in the store.
pub struct IngestionService {
    document_extractor: Arc<dyn DocumentExtractor>,
    text_chunker: Arc<dyn TextChunker>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    document_repository: Arc<dyn DocumentRepository>,
    default_user_id: String,
}

impl IngestionService {
    pub fn new(
        document_extractor: Arc<dyn DocumentExtractor>,
        text_chunker: Arc<dyn TextChunker>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        document_repository: Arc<dyn DocumentRepository>,
        default_user_id: String,
    ) -> Self {
        Self {
            document_extractor,
            text_chunker,
            embedding_provider,
            document_repository,
            default_user_id,
        }
    }

    pub async fn ingest(
        &self,
        user_id: Option<&str>,
        file: &UploadedFile,
    ) -> Result<IngestResponse, IngestionError> {
        let user_id = self.resolve_user_id(user_id);
        info!(
            "Ingesting {} ({} bytes) for user {}",
            file.filename(),
            file.size(),
            user_id
        );

        let text = self.document_extractor.extract_text(file).await.map_err(|e| {
            error!("Extraction failed for {}: {}", file.filename(), e);
            e
        })?;

        let chunks = self.text_chunker.chunk_text(&text);
        debug!("{} produced {} chunks", file.filename(), chunks.len());

        let expected_dimension = self.embedding_provider.embedding_dimension();

        for chunk in &chunks {
            let vector = self
                .embedding_provider
                .generate_embedding(chunk.text())
                .await
                .map_err(|e| {
                    error!(
                        "Embedding failed for chunk {} of {}: {}",
                        chunk.ordinal(),
                        file.filename(),
                        e
                    );
                    e
                })?;

            if !vector.has_dimension(expected_dimension) {
                return Err(EmbeddingProviderError::DimensionMismatch {
                    expected: expected_dimension,
                    actual: vector.dimension(),
                }
                .into());
            }

            let record = NewDocumentRecord::new(user_id, file.filename(), chunk.text(), vector);
            let id = self
                .document_repository
                .store_document(&record)
                .await
                .map_err(|e| {
                    error!(
                        "Storing chunk {} of {} failed: {}",
                        chunk.ordinal(),
                        file.filename(),
                        e
                    );
                    e
                })?;

            debug!("Chunk {} of {} stored as {}", chunk.ordinal(), file.filename(), id);
        }

        info!("Stored {} chunks for {}", chunks.len(), file.filename());

        Ok(IngestResponse {
            status: IngestStatus::Stored,
            chunk_count: chunks.len(),
        })
    }

    fn resolve_user_id<'a>(&'a self, user_id: Option<&'a str>) -> &'a str {
        match user_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => &self.default_user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FailingDocumentRepository, FailingEmbeddingProvider, FixedEmbeddingProvider,
        ParagraphChunker, RejectingDocumentRepository, Utf8Extractor,
        WrongDimensionEmbeddingProvider,
    };
    use crate::infrastructure::database::repositories::MemoryDocumentRepository;

    const DIMENSION: usize = 8;

    fn service_with(
        embedder: Arc<dyn EmbeddingProvider>,
        repository: Arc<MemoryDocumentRepository>,
    ) -> IngestionService {
        IngestionService::new(
            Arc::new(Utf8Extractor),
            Arc::new(ParagraphChunker),
            embedder,
            repository,
            "anonymous".to_string(),
        )
    }

    fn text_file(name: &str, text: &str) -> UploadedFile {
        UploadedFile::new(
            name.to_string(),
            Some("text/plain".to_string()),
            text.as_bytes().to_vec(),
        )
    }

    #[tokio::test]
    async fn test_two_chunk_file_is_stored_in_order() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            repository.clone(),
        );

        let file = text_file("notes.txt", "First paragraph.\n\nSecond paragraph.");
        let response = service.ingest(Some("u1"), &file).await.unwrap();

        assert_eq!(response.status, IngestStatus::Stored);
        assert_eq!(response.chunk_count, 2);

        let stored = repository.all().await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].content(), "First paragraph.");
        assert_eq!(stored[1].content(), "Second paragraph.");
        for record in &stored {
            assert_eq!(record.user_id(), "u1");
            assert_eq!(record.filename(), "notes.txt");
            assert_eq!(record.embedding().dimension(), DIMENSION);
        }
    }

    #[tokio::test]
    async fn test_empty_file_stores_nothing() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            repository.clone(),
        );

        let response = service
            .ingest(Some("u1"), &text_file("empty.txt", ""))
            .await
            .unwrap();

        assert_eq!(response.chunk_count, 0);
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_user_id_uses_default() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            repository.clone(),
        );

        service
            .ingest(None, &text_file("a.txt", "only one chunk"))
            .await
            .unwrap();
        service
            .ingest(Some("   "), &text_file("b.txt", "another chunk"))
            .await
            .unwrap();

        let stored = repository.all().await;
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|r| r.user_id() == "anonymous"));
    }

    #[tokio::test]
    async fn test_user_id_is_stored_as_given() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            repository.clone(),
        );

        service
            .ingest(Some(" u1 "), &text_file("a.txt", "padded id"))
            .await
            .unwrap();

        assert_eq!(repository.all().await[0].user_id(), " u1 ");
    }

    #[tokio::test]
    async fn test_reingesting_creates_new_records() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            repository.clone(),
        );
        let file = text_file("dup.txt", "alpha\n\nbeta");

        service.ingest(Some("u1"), &file).await.unwrap();
        service.ingest(Some("u1"), &file).await.unwrap();

        let stored = repository.all().await;
        assert_eq!(stored.len(), 4);
        let ids: Vec<i64> = stored.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_embedding_failure_keeps_earlier_chunks() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(FailingEmbeddingProvider::failing_on_call(2, DIMENSION)),
            repository.clone(),
        );

        let file = text_file("three.txt", "one\n\ntwo\n\nthree");
        let result = service.ingest(Some("u1"), &file).await;

        assert!(matches!(result, Err(IngestionError::EmbeddingError(_))));

        let stored = repository.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].content(), "one");
    }

    #[tokio::test]
    async fn test_wrong_dimension_is_rejected_before_storage() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(WrongDimensionEmbeddingProvider::new(DIMENSION, 3)),
            repository.clone(),
        );

        let result = service
            .ingest(Some("u1"), &text_file("a.txt", "some text"))
            .await;

        assert!(matches!(
            result,
            Err(IngestionError::EmbeddingError(
                EmbeddingProviderError::DimensionMismatch {
                    expected: 8,
                    actual: 3
                }
            ))
        ));
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let service = IngestionService::new(
            Arc::new(Utf8Extractor),
            Arc::new(ParagraphChunker),
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            Arc::new(RejectingDocumentRepository),
            "anonymous".to_string(),
        );

        let result = service
            .ingest(Some("u1"), &text_file("a.txt", "first\n\nsecond"))
            .await;

        assert!(matches!(result, Err(IngestionError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_earlier_chunks() {
        let repository = Arc::new(FailingDocumentRepository::failing_on_write(2));
        let service = IngestionService::new(
            Arc::new(Utf8Extractor),
            Arc::new(ParagraphChunker),
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            repository.clone(),
            "anonymous".to_string(),
        );

        let result = service
            .ingest(Some("u1"), &text_file("a.txt", "first\n\nsecond\n\nthird"))
            .await;

        assert!(matches!(
            result,
            Err(IngestionError::StorageError(
                DocumentRepositoryError::DatabaseError(_)
            ))
        ));

        let stored = repository.inner.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].content(), "first");
        assert_eq!(stored[0].user_id(), "u1");
    }

    #[tokio::test]
    async fn test_extraction_error_propagates() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let service = service_with(
            Arc::new(FixedEmbeddingProvider::new(DIMENSION)),
            repository.clone(),
        );

        let file = UploadedFile::new(
            "broken.txt".to_string(),
            Some("text/plain".to_string()),
            vec![0xff, 0xfe, 0xfd],
        );
        let result = service.ingest(Some("u1"), &file).await;

        assert!(matches!(result, Err(IngestionError::ExtractionError(_))));
        assert_eq!(repository.count().await.unwrap(), 0);
    }
}
