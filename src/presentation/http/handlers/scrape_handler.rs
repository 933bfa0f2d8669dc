use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::ScrapeService;
use crate::presentation::http::dto::{ProcessFileResponseDto, ScrapeRequestDto};
use crate::presentation::http::error::AppError;

pub struct ScrapeHandler {
    scrape_service: Arc<ScrapeService>,
}

impl ScrapeHandler {
    pub fn new(scrape_service: Arc<ScrapeService>) -> Self {
        Self { scrape_service }
    }

    pub async fn scrape(
        State(handler): State<Arc<ScrapeHandler>>,
        Json(body): Json<ScrapeRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler
            .scrape_service
            .scrape(&body.url, body.user_id.as_deref())
            .await?;

        Ok((StatusCode::OK, Json(ProcessFileResponseDto::from(response))))
    }
}
