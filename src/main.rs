mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::process::ExitCode;
use tracing::{error, info};

use infrastructure::{AppConfig, AppContainer};
use presentation::http::server::HttpServer;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let container = match AppContainer::new(&config).await {
        Ok(container) => container,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Embedding with {} ({} dimensions), chunk size {}",
        container.embedding_provider.model_name(),
        container.embedding_provider.embedding_dimension(),
        config.chunk_size
    );

    let server = HttpServer::new(&container, config.max_upload_bytes, config.port);
    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
