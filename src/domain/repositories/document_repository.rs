use async_trait::async_trait;

use crate::domain::entities::{DocumentRecord, NewDocumentRecord};
use crate::domain::value_objects::EmbeddingVector;

#[derive(Debug)]
pub enum DocumentRepositoryError {
    ConnectionError(String),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            DocumentRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: DocumentRecord,
    pub similarity_score: f32,
}

/// Append-only table of embedded document chunks.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Appends one record and returns the identifier the store assigned.
    async fn store_document(
        &self,
        record: &NewDocumentRecord,
    ) -> Result<i64, DocumentRepositoryError>;

    /// Records closest to `query_vector` by cosine similarity, best first.
    async fn similarity_search(
        &self,
        query_vector: &EmbeddingVector,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, DocumentRepositoryError>;

    async fn count(&self) -> Result<i64, DocumentRepositoryError>;
}
