pub mod document_extractor;
pub mod embedding_provider;
pub mod page_fetcher;

pub use document_extractor::{DocumentExtractor, TextChunker};
pub use embedding_provider::EmbeddingProvider;
pub use page_fetcher::PageFetcher;
