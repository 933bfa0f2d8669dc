use async_trait::async_trait;

#[derive(Debug)]
pub enum PageFetchError {
    InvalidUrl(String),
    RequestFailed(String),
    HttpStatus(u16),
    TooLarge { limit: usize },
}

impl std::fmt::Display for PageFetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageFetchError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            PageFetchError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            PageFetchError::HttpStatus(status) => {
                write!(f, "Remote server responded with status {}", status)
            }
            PageFetchError::TooLarge { limit } => {
                write!(f, "Page exceeds the {} byte limit", limit)
            }
        }
    }
}

impl std::error::Error for PageFetchError {}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL as requested, before any redirects.
    pub url: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, PageFetchError>;
}
