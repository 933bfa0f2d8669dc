use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::search_service::QueryResponse;
use crate::domain::repositories::document_repository::ScoredDocument;

#[derive(Debug, Deserialize)]
pub struct QueryRequestDto {
    pub query: String,
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponseDto {
    pub query: String,
    pub results: Vec<QueryResultDto>,
    pub total_results: usize,
    pub search_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct QueryResultDto {
    pub id: i64,
    pub user_id: String,
    pub filename: String,
    pub content: String,
    pub score: f32,
    pub created_at: DateTime<Utc>,
}

impl From<QueryResponse> for QueryResponseDto {
    fn from(response: QueryResponse) -> Self {
        Self {
            query: response.query,
            total_results: response.results.len(),
            results: response.results.into_iter().map(QueryResultDto::from).collect(),
            search_time_ms: response.search_time_ms,
        }
    }
}

impl From<ScoredDocument> for QueryResultDto {
    fn from(result: ScoredDocument) -> Self {
        Self {
            id: result.document.id(),
            user_id: result.document.user_id().to_string(),
            filename: result.document.filename().to_string(),
            content: result.document.content().to_string(),
            score: result.similarity_score,
            created_at: result.document.created_at(),
        }
    }
}
