pub mod document_extractors;
pub mod http_page_fetcher;
pub mod inference_client;
pub mod recursive_splitter;

pub use http_page_fetcher::HttpPageFetcher;
pub use inference_client::InferenceEmbeddingProvider;
pub use recursive_splitter::RecursiveTextSplitter;
