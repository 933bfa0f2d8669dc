use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};
use crate::domain::value_objects::EmbeddingVector;

#[derive(Serialize)]
pub struct EmbeddingsRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingsResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub embeddings: Vec<Vec<f32>>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub service_url: String,
    pub api_key: Option<String>,
    pub model_name: String,
    pub dimension: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

#[derive(Debug)]
pub enum EmbeddingsError {
    RequestError(String),
    StatusError(u16, String),
    ParseError(String),
}

impl std::fmt::Display for EmbeddingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingsError::RequestError(msg) => write!(f, "Request error: {}", msg),
            EmbeddingsError::StatusError(status, body) => {
                write!(f, "Embedding service returned {}: {}", status, body)
            }
            EmbeddingsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl EmbeddingsError {
    /// Client errors (4xx) will fail the same way again.
    fn is_retryable(&self) -> bool {
        match self {
            EmbeddingsError::RequestError(_) => true,
            EmbeddingsError::StatusError(status, _) => *status == 429 || *status >= 500,
            EmbeddingsError::ParseError(_) => false,
        }
    }
}

/// HTTP client for the embeddings inference service.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl InferenceClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmbeddingsClientConfig {
        &self.config
    }

    pub async fn get_embedding(&self, text: &str) -> Result<EmbeddingsResponse, EmbeddingsError> {
        let request = EmbeddingsRequest { text };

        self.send_request(&request).await
    }

    async fn send_request(
        &self,
        request: &EmbeddingsRequest<'_>,
    ) -> Result<EmbeddingsResponse, EmbeddingsError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.execute_request(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempts <= self.config.max_retries => {
                    let backoff_time = backoff_delay(self.config.backoff_factor, attempts);
                    warn!(
                        "Embedding request failed (attempt {}), retrying in {} ms: {}",
                        attempts,
                        backoff_time.as_millis(),
                        e
                    );
                    tokio::time::sleep(backoff_time).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_request(
        &self,
        request: &EmbeddingsRequest<'_>,
    ) -> Result<EmbeddingsResponse, EmbeddingsError> {
        let mut builder = self
            .client
            .post(&self.config.service_url)
            .header("Content-Type", "application/json")
            .json(request);

        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EmbeddingsError::RequestError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingsError::StatusError(status.as_u16(), body));
        }

        response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingsError::ParseError(e.to_string()))
    }
}

const MAX_BACKOFF_MS: f64 = 60_000.0;

fn backoff_delay(backoff_factor: f64, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
    let millis = backoff_factor.powi(exponent) * 1000.0;
    if millis.is_nan() {
        return Duration::ZERO;
    }
    Duration::from_millis(millis.clamp(0.0, MAX_BACKOFF_MS) as u64)
}

/// Picks the single vector out of a service reply.
fn first_embedding(response: EmbeddingsResponse) -> Result<EmbeddingVector, EmbeddingProviderError> {
    if !response.success {
        return Err(EmbeddingProviderError::ApiError(
            "Embedding service reported failure".to_string(),
        ));
    }

    response
        .embeddings
        .into_iter()
        .next()
        .map(EmbeddingVector::new)
        .ok_or_else(|| EmbeddingProviderError::ApiError("No embeddings returned".to_string()))
}

// Adapter to implement the EmbeddingProvider trait
pub struct InferenceEmbeddingProvider {
    client: InferenceClient,
}

impl InferenceEmbeddingProvider {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        Ok(Self::new(InferenceClient::new(config)?))
    }
}

#[async_trait]
impl EmbeddingProvider for InferenceEmbeddingProvider {
    async fn generate_embedding(
        &self,
        text: &str,
    ) -> Result<EmbeddingVector, EmbeddingProviderError> {
        if text.trim().is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "Cannot embed empty text".to_string(),
            ));
        }

        let response = self.client.get_embedding(text).await.map_err(|e| match e {
            EmbeddingsError::RequestError(msg) => EmbeddingProviderError::NetworkError(msg),
            EmbeddingsError::StatusError(503, _) => EmbeddingProviderError::ServiceUnavailable,
            EmbeddingsError::StatusError(..) => EmbeddingProviderError::ApiError(e.to_string()),
            EmbeddingsError::ParseError(msg) => EmbeddingProviderError::ApiError(msg),
        })?;

        first_embedding(response)
    }

    fn model_name(&self) -> &str {
        &self.client.config().model_name
    }

    fn embedding_dimension(&self) -> usize {
        self.client.config().dimension
    }
}
