use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::application::ports::PageFetcher;
use crate::application::ports::page_fetcher::PageFetchError;
use crate::application::services::ingestion_service::{
    IngestResponse, IngestionError, IngestionService,
};
use crate::domain::entities::UploadedFile;

#[derive(Debug)]
pub enum ScrapeError {
    InvalidUrl(String),
    FetchError(PageFetchError),
    IngestionError(IngestionError),
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ScrapeError::FetchError(e) => write!(f, "Fetch error: {}", e),
            ScrapeError::IngestionError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScrapeError {}

impl From<PageFetchError> for ScrapeError {
    fn from(error: PageFetchError) -> Self {
        ScrapeError::FetchError(error)
    }
}

impl From<IngestionError> for ScrapeError {
    fn from(error: IngestionError) -> Self {
        ScrapeError::IngestionError(error)
    }
}

/// Fetches a web page and feeds it through the ingestion pipeline under
/// its URL as the filename.
pub struct ScrapeService {
    page_fetcher: Arc<dyn PageFetcher>,
    ingestion_service: Arc<IngestionService>,
}

impl ScrapeService {
    pub fn new(page_fetcher: Arc<dyn PageFetcher>, ingestion_service: Arc<IngestionService>) -> Self {
        Self {
            page_fetcher,
            ingestion_service,
        }
    }

    pub async fn scrape(
        &self,
        url: &str,
        user_id: Option<&str>,
    ) -> Result<IngestResponse, ScrapeError> {
        let url = validate_url(url)?;

        let page = self.page_fetcher.fetch(url.as_str()).await?;
        info!("Fetched {} ({} bytes)", page.url, page.body.len());

        let content_type = page
            .content_type
            .or_else(|| Some("text/html".to_string()));
        let file = UploadedFile::new(page.url, content_type, page.body);

        Ok(self.ingestion_service.ingest(user_id, &file).await?)
    }
}

fn validate_url(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw.trim()).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FixedEmbeddingProvider, ParagraphChunker, StaticPageFetcher,
    };
    use crate::infrastructure::external_services::document_extractors::CompositeDocumentExtractor;
    use crate::infrastructure::database::repositories::MemoryDocumentRepository;

    fn service(
        fetcher: StaticPageFetcher,
        repository: Arc<MemoryDocumentRepository>,
    ) -> ScrapeService {
        let ingestion = Arc::new(IngestionService::new(
            Arc::new(CompositeDocumentExtractor::new()),
            Arc::new(ParagraphChunker),
            Arc::new(FixedEmbeddingProvider::new(4)),
            repository,
            "anonymous".to_string(),
        ));
        ScrapeService::new(Arc::new(fetcher), ingestion)
    }

    #[tokio::test]
    async fn test_scrape_ingests_page_under_its_url() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let scraper = service(
            StaticPageFetcher {
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: "<html><body><p>Hello from the web.</p></body></html>".to_string(),
            },
            repository.clone(),
        );

        let response = scraper
            .scrape("https://example.com/page", Some("u7"))
            .await
            .unwrap();

        assert_eq!(response.chunk_count, 1);
        let stored = repository.all().await;
        assert_eq!(stored[0].filename(), "https://example.com/page");
        assert_eq!(stored[0].user_id(), "u7");
        assert!(stored[0].content().contains("Hello from the web."));
    }

    #[tokio::test]
    async fn test_scrape_defaults_to_html_when_type_missing() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let scraper = service(
            StaticPageFetcher {
                content_type: None,
                body: "<p>untyped</p>".to_string(),
            },
            repository.clone(),
        );

        scraper.scrape("http://example.com", None).await.unwrap();

        let stored = repository.all().await;
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].content().contains("<p>"));
        assert_eq!(stored[0].user_id(), "anonymous");
    }

    #[tokio::test]
    async fn test_scrape_rejects_bad_urls() {
        let repository = Arc::new(MemoryDocumentRepository::new());
        let scraper = service(
            StaticPageFetcher {
                content_type: None,
                body: String::new(),
            },
            repository,
        );

        assert!(matches!(
            scraper.scrape("not a url", None).await,
            Err(ScrapeError::InvalidUrl(_))
        ));
        assert!(matches!(
            scraper.scrape("ftp://example.com/file", None).await,
            Err(ScrapeError::InvalidUrl(_))
        ));
    }
}
