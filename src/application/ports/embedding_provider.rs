use async_trait::async_trait;

use crate::domain::value_objects::EmbeddingVector;

#[derive(Debug)]
pub enum EmbeddingProviderError {
    NetworkError(String),
    ApiError(String),
    InvalidInput(String),
    DimensionMismatch { expected: usize, actual: usize },
    ServiceUnavailable,
}

impl std::fmt::Display for EmbeddingProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingProviderError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EmbeddingProviderError::DimensionMismatch { expected, actual } => write!(
                f,
                "Embedding dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            EmbeddingProviderError::ServiceUnavailable => write!(f, "Service unavailable"),
        }
    }
}

impl std::error::Error for EmbeddingProviderError {}

/// Maps a piece of text to a fixed-length vector.
///
/// Every vector returned for a given provider is expected to have
/// `embedding_dimension()` components; callers check this before storing.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn generate_embedding(
        &self,
        text: &str,
    ) -> Result<EmbeddingVector, EmbeddingProviderError>;

    fn model_name(&self) -> &str;

    fn embedding_dimension(&self) -> usize;
}
