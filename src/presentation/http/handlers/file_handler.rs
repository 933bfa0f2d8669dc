use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::services::IngestionService;
use crate::domain::entities::UploadedFile;
use crate::presentation::http::dto::{ProcessFileResponseDto, UserIdParams};
use crate::presentation::http::error::AppError;

const USER_ID_FIELD: &str = "user_id";

pub struct FileHandler {
    ingestion_service: Arc<IngestionService>,
}

impl FileHandler {
    pub fn new(ingestion_service: Arc<IngestionService>) -> Self {
        Self { ingestion_service }
    }

    /// `POST /files/process`: one file part plus an optional `user_id`
    /// field. A `user_id` query parameter is accepted too; the form field
    /// wins when both are present.
    pub async fn process_file(
        State(handler): State<Arc<FileHandler>>,
        Query(params): Query<UserIdParams>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, AppError> {
        let mut uploaded_file: Option<UploadedFile> = None;
        let mut form_user_id: Option<String> = None;

        while let Some(field) = multipart.next_field().await? {
            if let Some(file_name) = field.file_name().map(|name| name.to_string()) {
                if uploaded_file.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one file may be uploaded per request".to_string(),
                    ));
                }

                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field.bytes().await?.to_vec();

                uploaded_file = Some(UploadedFile::new(file_name, content_type, data));
            } else if field.name() == Some(USER_ID_FIELD) {
                form_user_id = Some(field.text().await?);
            }
        }

        let file = uploaded_file
            .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
        let user_id = form_user_id.or(params.user_id);

        let response = handler
            .ingestion_service
            .ingest(user_id.as_deref(), &file)
            .await?;

        Ok((StatusCode::OK, Json(ProcessFileResponseDto::from(response))))
    }
}
