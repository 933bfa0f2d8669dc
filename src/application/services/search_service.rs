use std::sync::Arc;
use tracing::info;

use crate::application::ports::EmbeddingProvider;
use crate::domain::repositories::DocumentRepository;
use crate::domain::repositories::document_repository::ScoredDocument;

pub const MAX_QUERY_LIMIT: usize = 50;

#[derive(Debug)]
pub enum SearchServiceError {
    ValidationError(String),
    EmbeddingError(String),
    RepositoryError(String),
}

impl std::fmt::Display for SearchServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SearchServiceError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            SearchServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for SearchServiceError {}

#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub query: String,
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub query: String,
    pub results: Vec<ScoredDocument>,
    pub search_time_ms: u64,
}

/// Retrieval side of the RAG flow: embeds a question and returns the
/// nearest stored chunks.
pub struct SearchService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    document_repository: Arc<dyn DocumentRepository>,
    default_limit: usize,
}

impl SearchService {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        document_repository: Arc<dyn DocumentRepository>,
        default_limit: usize,
    ) -> Self {
        Self {
            embedding_provider,
            document_repository,
            default_limit,
        }
    }

    pub async fn query(&self, request: QueryRequest) -> Result<QueryResponse, SearchServiceError> {
        let start_time = std::time::Instant::now();

        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchServiceError::ValidationError(
                "Query cannot be empty".to_string(),
            ));
        }

        let limit = request.limit.unwrap_or(self.default_limit);
        if limit == 0 || limit > MAX_QUERY_LIMIT {
            return Err(SearchServiceError::ValidationError(format!(
                "Limit must be between 1 and {}",
                MAX_QUERY_LIMIT
            )));
        }

        let query_vector = self
            .embedding_provider
            .generate_embedding(query)
            .await
            .map_err(|e| SearchServiceError::EmbeddingError(e.to_string()))?;

        let user_id = request
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        let results = self
            .document_repository
            .similarity_search(&query_vector, user_id, limit)
            .await
            .map_err(|e| SearchServiceError::RepositoryError(e.to_string()))?;

        let search_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Query returned {} results in {} ms",
            results.len(),
            search_time_ms
        );

        Ok(QueryResponse {
            query: query.to_string(),
            results,
            search_time_ms,
        })
    }
}
