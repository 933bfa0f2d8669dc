pub mod ingestion_service;
pub mod scrape_service;
pub mod search_service;

pub use ingestion_service::IngestionService;
pub use scrape_service::ScrapeService;
pub use search_service::SearchService;
