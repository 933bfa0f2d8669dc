use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope for read endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: &'static str,
    pub version: &'static str,
    /// `None` when the document store could not be reached.
    pub documents: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub message: &'static str,
}
