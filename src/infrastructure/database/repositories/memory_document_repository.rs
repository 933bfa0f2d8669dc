//! In-process document store.
//!
//! Keeps records in insertion order and answers similarity queries with a
//! brute-force cosine scan. Used with `DOCUMENT_STORE=memory` and by tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{DocumentRecord, NewDocumentRecord};
use crate::domain::repositories::DocumentRepository;
use crate::domain::repositories::document_repository::{DocumentRepositoryError, ScoredDocument};
use crate::domain::value_objects::EmbeddingVector;

#[derive(Default)]
pub struct MemoryDocumentRepository {
    documents: RwLock<Vec<DocumentRecord>>,
}

impl MemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record in insertion order.
    #[cfg(test)]
    pub async fn all(&self) -> Vec<DocumentRecord> {
        self.documents.read().await.clone()
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    async fn store_document(
        &self,
        record: &NewDocumentRecord,
    ) -> Result<i64, DocumentRepositoryError> {
        let mut documents = self.documents.write().await;
        let id = documents.len() as i64 + 1;

        documents.push(DocumentRecord::from_new(id, record.clone()));
        debug!("Stored document {} ({} chunk bytes)", id, record.content.len());

        Ok(id)
    }

    async fn similarity_search(
        &self,
        query_vector: &EmbeddingVector,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, DocumentRepositoryError> {
        let documents = self.documents.read().await;

        let mut results: Vec<ScoredDocument> = documents
            .iter()
            .filter(|doc| user_id.is_none_or(|uid| doc.belongs_to(uid)))
            .map(|doc| ScoredDocument {
                similarity_score: query_vector.cosine_similarity(doc.embedding()),
                document: doc.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        Ok(self.documents.read().await.len() as i64)
    }
}
