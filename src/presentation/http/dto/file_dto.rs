use serde::{Deserialize, Serialize};

use crate::application::services::ingestion_service::{IngestResponse, IngestStatus};

#[derive(Debug, Deserialize)]
pub struct UserIdParams {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessFileResponseDto {
    pub status: IngestStatus,
    pub chunks: usize,
}

impl From<IngestResponse> for ProcessFileResponseDto {
    fn from(response: IngestResponse) -> Self {
        Self {
            status: response.status,
            chunks: response.chunk_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequestDto {
    pub url: String,
    pub user_id: Option<String>,
}
