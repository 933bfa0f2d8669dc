use axum::{Router, extract::DefaultBodyLimit};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::infrastructure::AppContainer;
use crate::presentation::http::routes::{file_routes, health_routes, query_routes, scrape_routes};

pub struct HttpServer {
    router: Router,
    port: u16,
}

impl HttpServer {
    pub fn new(container: &AppContainer, max_upload_bytes: usize, port: u16) -> Self {
        Self {
            router: build_router(container, max_upload_bytes),
            port,
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", addr);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

pub fn build_router(container: &AppContainer, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health_routes(container.document_repository.clone()))
        .merge(file_routes(container.file_handler.clone()))
        .merge(query_routes(container.query_handler.clone()))
        .merge(scrape_routes(container.scrape_handler.clone()))
        .layer(cors)
        // Multipart uploads are capped by axum's own limit before ours applies
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(
            TraceLayer::new_for_http()
                .on_request(
                    |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                        tracing::info!("Received request: {} {}", request.method(), request.uri());
                    },
                )
                .on_response(
                    |response: &axum::http::Response<axum::body::Body>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            "Response: {} (took {} ms)",
                            response.status(),
                            latency.as_millis()
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            "Request failed: {:?} (took {} ms)",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
}
