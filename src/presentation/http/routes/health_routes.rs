use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use std::sync::Arc;
use tracing::warn;

use crate::domain::repositories::DocumentRepository;
use crate::presentation::http::dto::{HealthResponseDto, MessageResponseDto};

pub fn health_routes(document_repository: Arc<dyn DocumentRepository>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(document_repository)
}

async fn root_handler() -> impl IntoResponse {
    Json(MessageResponseDto {
        message: "RAG Backend is running!",
    })
}

async fn health_handler(
    State(document_repository): State<Arc<dyn DocumentRepository>>,
) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");

    match document_repository.count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponseDto {
                status: "healthy",
                version,
                documents: Some(count),
            }),
        ),
        Err(e) => {
            warn!("Health check could not reach the document store: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponseDto {
                    status: "unavailable",
                    version,
                    documents: None,
                }),
            )
        }
    }
}
