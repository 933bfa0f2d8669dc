//! Test doubles for the application ports.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::document_extractor::DocumentExtractionError;
use crate::application::ports::embedding_provider::EmbeddingProviderError;
use crate::application::ports::page_fetcher::{FetchedPage, PageFetchError};
use crate::application::ports::{DocumentExtractor, EmbeddingProvider, PageFetcher, TextChunker};
use crate::domain::entities::{NewDocumentRecord, TextChunk, UploadedFile};
use crate::domain::repositories::DocumentRepository;
use crate::domain::repositories::document_repository::{DocumentRepositoryError, ScoredDocument};
use crate::domain::value_objects::EmbeddingVector;
use crate::infrastructure::database::repositories::MemoryDocumentRepository;

/// Decodes the bytes as UTF-8, whatever the declared type.
pub struct Utf8Extractor;

#[async_trait]
impl DocumentExtractor for Utf8Extractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, DocumentExtractionError> {
        String::from_utf8(file.data().to_vec())
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))
    }

    fn media_types(&self) -> Vec<&'static str> {
        vec!["text/plain"]
    }

    fn can_extract(&self, _file_type: &str) -> bool {
        true
    }
}

/// One chunk per blank-line separated paragraph.
pub struct ParagraphChunker;

impl TextChunker for ParagraphChunker {
    fn chunk_text(&self, text: &str) -> Vec<TextChunk> {
        text.split("\n\n")
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .enumerate()
            .map(|(ordinal, part)| TextChunk::new(ordinal, part.to_string()))
            .collect()
    }
}

/// Deterministic embedder: the vector is derived from the text bytes.
pub struct FixedEmbeddingProvider {
    dimension: usize,
}

impl FixedEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

pub fn embed_text(text: &str, dimension: usize) -> EmbeddingVector {
    let mut values = vec![0.0f32; dimension];
    for (i, byte) in text.bytes().enumerate() {
        values[i % dimension] += byte as f32 / 255.0;
    }
    EmbeddingVector::new(values)
}

#[async_trait]
impl EmbeddingProvider for FixedEmbeddingProvider {
    async fn generate_embedding(
        &self,
        text: &str,
    ) -> Result<EmbeddingVector, EmbeddingProviderError> {
        Ok(embed_text(text, self.dimension))
    }

    fn model_name(&self) -> &str {
        "fixed"
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }
}

/// Succeeds until the `fail_on`-th call (1-based), which fails.
pub struct FailingEmbeddingProvider {
    fail_on: usize,
    dimension: usize,
    calls: AtomicUsize,
}

impl FailingEmbeddingProvider {
    pub fn failing_on_call(fail_on: usize, dimension: usize) -> Self {
        Self {
            fail_on,
            dimension,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FailingEmbeddingProvider {
    async fn generate_embedding(
        &self,
        text: &str,
    ) -> Result<EmbeddingVector, EmbeddingProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(EmbeddingProviderError::ServiceUnavailable);
        }
        Ok(embed_text(text, self.dimension))
    }

    fn model_name(&self) -> &str {
        "failing"
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }
}

/// Advertises one dimension and returns vectors of another.
pub struct WrongDimensionEmbeddingProvider {
    advertised: usize,
    actual: usize,
}

impl WrongDimensionEmbeddingProvider {
    pub fn new(advertised: usize, actual: usize) -> Self {
        Self { advertised, actual }
    }
}

#[async_trait]
impl EmbeddingProvider for WrongDimensionEmbeddingProvider {
    async fn generate_embedding(
        &self,
        text: &str,
    ) -> Result<EmbeddingVector, EmbeddingProviderError> {
        Ok(embed_text(text, self.actual))
    }

    fn model_name(&self) -> &str {
        "wrong-dimension"
    }

    fn embedding_dimension(&self) -> usize {
        self.advertised
    }
}

/// Store that rejects every write.
pub struct RejectingDocumentRepository;

#[async_trait]
impl DocumentRepository for RejectingDocumentRepository {
    async fn store_document(
        &self,
        _record: &NewDocumentRecord,
    ) -> Result<i64, DocumentRepositoryError> {
        Err(DocumentRepositoryError::DatabaseError(
            "relation \"documents\" does not exist".to_string(),
        ))
    }

    async fn similarity_search(
        &self,
        _query_vector: &EmbeddingVector,
        _user_id: Option<&str>,
        _limit: usize,
    ) -> Result<Vec<ScoredDocument>, DocumentRepositoryError> {
        Err(DocumentRepositoryError::ConnectionError(
            "connection refused".to_string(),
        ))
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        Ok(0)
    }
}

/// In-memory store whose `fail_on`-th write (1-based) fails.
pub struct FailingDocumentRepository {
    pub inner: MemoryDocumentRepository,
    fail_on: usize,
    writes: AtomicUsize,
}

impl FailingDocumentRepository {
    pub fn failing_on_write(fail_on: usize) -> Self {
        Self {
            inner: MemoryDocumentRepository::new(),
            fail_on,
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentRepository for FailingDocumentRepository {
    async fn store_document(
        &self,
        record: &NewDocumentRecord,
    ) -> Result<i64, DocumentRepositoryError> {
        let write = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if write == self.fail_on {
            return Err(DocumentRepositoryError::DatabaseError(
                "could not extend file: No space left on device".to_string(),
            ));
        }
        self.inner.store_document(record).await
    }

    async fn similarity_search(
        &self,
        query_vector: &EmbeddingVector,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, DocumentRepositoryError> {
        self.inner.similarity_search(query_vector, user_id, limit).await
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        self.inner.count().await
    }
}

/// Serves a fixed page body for any URL.
pub struct StaticPageFetcher {
    pub content_type: Option<String>,
    pub body: String,
}

#[async_trait]
impl PageFetcher for StaticPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, PageFetchError> {
        Ok(FetchedPage {
            url: url.to_string(),
            content_type: self.content_type.clone(),
            body: self.body.as_bytes().to_vec(),
        })
    }
}
