use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::application::ports::page_fetcher::PageFetchError;
use crate::application::services::ingestion_service::IngestionError;
use crate::application::services::scrape_service::ScrapeError;
use crate::application::services::search_service::SearchServiceError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    PayloadTooLarge(String),
    ExtractionError(String),
    UpstreamError(String),
    StorageError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ExtractionError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::ExtractionError(msg)
            | AppError::UpstreamError(msg)
            | AppError::StorageError(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(error: MultipartError) -> Self {
        let message = format!("Failed to process form: {}", error.body_text());
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    }
}

impl From<IngestionError> for AppError {
    fn from(error: IngestionError) -> Self {
        let message = error.to_string();
        match error {
            IngestionError::ExtractionError(_) => AppError::ExtractionError(message),
            IngestionError::EmbeddingError(_) => AppError::UpstreamError(message),
            IngestionError::StorageError(_) => AppError::StorageError(message),
        }
    }
}

impl From<ScrapeError> for AppError {
    fn from(error: ScrapeError) -> Self {
        match error {
            ScrapeError::InvalidUrl(_) => AppError::BadRequest(error.to_string()),
            ScrapeError::FetchError(PageFetchError::TooLarge { .. }) => {
                AppError::PayloadTooLarge(error.to_string())
            }
            ScrapeError::FetchError(_) => AppError::UpstreamError(error.to_string()),
            ScrapeError::IngestionError(inner) => inner.into(),
        }
    }
}

impl From<SearchServiceError> for AppError {
    fn from(error: SearchServiceError) -> Self {
        let message = error.to_string();
        match error {
            SearchServiceError::ValidationError(_) => AppError::BadRequest(message),
            SearchServiceError::EmbeddingError(_) => AppError::UpstreamError(message),
            SearchServiceError::RepositoryError(_) => AppError::StorageError(message),
        }
    }
}
