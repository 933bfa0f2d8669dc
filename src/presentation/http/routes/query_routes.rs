use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::QueryHandler;

pub fn query_routes(query_handler: Arc<QueryHandler>) -> Router {
    Router::new()
        .route("/query", post(QueryHandler::query))
        .with_state(query_handler)
}
