use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::FileHandler;

pub fn file_routes(file_handler: Arc<FileHandler>) -> Router {
    Router::new()
        .route("/files/process", post(FileHandler::process_file))
        .with_state(file_handler)
}
