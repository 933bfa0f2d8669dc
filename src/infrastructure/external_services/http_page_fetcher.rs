use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, header::CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use crate::application::ports::page_fetcher::{FetchedPage, PageFetchError, PageFetcher};

/// Fetches pages over HTTP, reading at most `max_body_bytes` of each body.
pub struct HttpPageFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpPageFetcher {
    pub fn new(timeout_secs: u64, max_body_bytes: usize) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, PageFetchError> {
        Url::parse(url).map_err(|e| PageFetchError::InvalidUrl(e.to_string()))?;

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PageFetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageFetchError::HttpStatus(status.as_u16()));
        }

        let too_large = PageFetchError::TooLarge {
            limit: self.max_body_bytes,
        };
        if response
            .content_length()
            .is_some_and(|length| length > self.max_body_bytes as u64)
        {
            return Err(too_large);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        // Content-Length may be absent or wrong, so the cap is enforced while reading
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| PageFetchError::RequestFailed(format!("Failed to read response: {}", e)))?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large);
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            url: url.to_string(),
            content_type,
            body,
        })
    }
}
