use std::sync::Arc;
use tracing::info;

use crate::{
    application::{
        ports::{DocumentExtractor, EmbeddingProvider, PageFetcher, TextChunker},
        services::{IngestionService, ScrapeService, SearchService},
    },
    domain::repositories::DocumentRepository,
    infrastructure::{
        config::{AppConfig, DocumentStoreBackend},
        database::{
            open_document_store,
            repositories::{MemoryDocumentRepository, PostgresDocumentRepository},
        },
        external_services::{
            HttpPageFetcher, InferenceEmbeddingProvider, RecursiveTextSplitter,
            document_extractors::CompositeDocumentExtractor,
        },
    },
    presentation::http::handlers::{FileHandler, QueryHandler, ScrapeHandler},
};

/// Process-wide object graph, built once at startup.
pub struct AppContainer {
    // Collaborators
    pub document_repository: Arc<dyn DocumentRepository>,
    pub embedding_provider: Arc<dyn EmbeddingProvider>,

    // HTTP Handlers
    pub file_handler: Arc<FileHandler>,
    pub query_handler: Arc<QueryHandler>,
    pub scrape_handler: Arc<ScrapeHandler>,
}

impl AppContainer {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let document_repository: Arc<dyn DocumentRepository> = match &config.document_store {
            DocumentStoreBackend::Postgres {
                database_url,
                pool_size,
            } => {
                let db_pool = open_document_store(database_url, *pool_size)
                    .map_err(|e| format!("Failed to open document store: {}", e))?;
                info!("Using Postgres document store");
                Arc::new(PostgresDocumentRepository::new(db_pool))
            }
            DocumentStoreBackend::Memory => {
                info!("Using in-memory document store, records are lost on restart");
                Arc::new(MemoryDocumentRepository::new())
            }
        };

        let embedding_provider: Arc<dyn EmbeddingProvider> = Arc::new(
            InferenceEmbeddingProvider::from_config(config.embeddings.clone())
                .map_err(|e| format!("Failed to create embeddings client: {}", e))?,
        );

        let document_extractor: Arc<dyn DocumentExtractor> =
            Arc::new(CompositeDocumentExtractor::new());
        let text_chunker: Arc<dyn TextChunker> =
            Arc::new(RecursiveTextSplitter::new(config.chunk_size));
        let page_fetcher: Arc<dyn PageFetcher> = Arc::new(
            HttpPageFetcher::new(config.scrape_timeout_secs, config.max_upload_bytes)
                .map_err(|e| format!("Failed to create page fetcher: {}", e))?,
        );

        Ok(Self::from_parts(
            config,
            document_repository,
            embedding_provider,
            document_extractor,
            text_chunker,
            page_fetcher,
        ))
    }

    /// Wires services and handlers around already-built collaborators.
    pub fn from_parts(
        config: &AppConfig,
        document_repository: Arc<dyn DocumentRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        document_extractor: Arc<dyn DocumentExtractor>,
        text_chunker: Arc<dyn TextChunker>,
        page_fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let ingestion_service = Arc::new(IngestionService::new(
            document_extractor,
            text_chunker,
            embedding_provider.clone(),
            document_repository.clone(),
            config.default_user_id.clone(),
        ));

        let search_service = Arc::new(SearchService::new(
            embedding_provider.clone(),
            document_repository.clone(),
            config.query_default_limit,
        ));

        let scrape_service = Arc::new(ScrapeService::new(page_fetcher, ingestion_service.clone()));

        let file_handler = Arc::new(FileHandler::new(ingestion_service));
        let query_handler = Arc::new(QueryHandler::new(search_service));
        let scrape_handler = Arc::new(ScrapeHandler::new(scrape_service));

        Self {
            document_repository,
            embedding_provider,
            file_handler,
            query_handler,
            scrape_handler,
        }
    }
}
