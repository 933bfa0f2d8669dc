use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ScrapeHandler;

pub fn scrape_routes(scrape_handler: Arc<ScrapeHandler>) -> Router {
    Router::new()
        .route("/scrape", post(ScrapeHandler::scrape))
        .with_state(scrape_handler)
}
