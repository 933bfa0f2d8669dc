use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::SearchService;
use crate::application::services::search_service::QueryRequest;
use crate::presentation::http::dto::{ApiResponse, QueryRequestDto, QueryResponseDto};
use crate::presentation::http::error::AppError;

pub struct QueryHandler {
    search_service: Arc<SearchService>,
}

impl QueryHandler {
    pub fn new(search_service: Arc<SearchService>) -> Self {
        Self { search_service }
    }

    pub async fn query(
        State(handler): State<Arc<QueryHandler>>,
        Json(body): Json<QueryRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = QueryRequest {
            query: body.query,
            user_id: body.user_id,
            limit: body.limit,
        };

        let response = handler.search_service.query(request).await?;
        let dto = QueryResponseDto::from(response);

        Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
    }
}
