//! Document fetching
//!
//! Resolves a URL to parsed JSON. `http`/`https` go through `reqwest`;
//! `file://` URLs and bare paths are read from disk. Retries, timeouts and
//! cancellation are left to whoever wraps the fetcher.

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Fetches a document and parses it as JSON
#[async_trait]
pub trait DocumentFetcher: Send + Sync + 'static {
    /// Fetch and parse the document at `url`
    ///
    /// # Errors
    /// Returns an error on transport failure or if the body is not JSON
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// Fetcher for HTTP(S) URLs and local files
#[derive(Debug, Clone)]
pub struct DefaultFetcher {
    client: reqwest::Client,
    max_document_bytes: u64,
}

impl DefaultFetcher {
    /// Create fetcher rejecting documents above `max_document_bytes`
    #[inline]
    #[must_use]
    pub fn new(max_document_bytes: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            max_document_bytes,
        }
    }

    async fn fetch_http(&self, url: &str) -> Result<Value, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let mut response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if let Some(length) = response.content_length() {
            self.check_size(url, length)?;
        }

        // Content-Length may be absent (chunked) or wrong; bound the body as it streams.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(request_error)? {
            self.check_size(url, (body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        parse_json(url, &body)
    }

    async fn fetch_file(&self, url: &str, path: &Path) -> Result<Value, FetchError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FetchError::io_error(path, e))?;
        self.check_size(url, metadata.len())?;

        let body = tokio::fs::read(path)
            .await
            .map_err(|e| FetchError::io_error(path, e))?;
        parse_json(url, &body)
    }

    fn check_size(&self, url: &str, size: u64) -> Result<(), FetchError> {
        if size > self.max_document_bytes {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                size,
                max: self.max_document_bytes,
            });
        }
        Ok(())
    }
}

impl Default for DefaultFetcher {
    fn default() -> Self {
        Self::new(crate::SourceConfig::default().max_document_bytes)
    }
}

#[async_trait]
impl DocumentFetcher for DefaultFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        match url.split_once("://") {
            Some(("http" | "https", _)) => self.fetch_http(url).await,
            Some(("file", path)) => self.fetch_file(url, Path::new(path)).await,
            Some((scheme, _)) => Err(FetchError::UnsupportedScheme(scheme.to_string())),
            None => self.fetch_file(url, Path::new(url)).await,
        }
    }
}

fn parse_json(url: &str, body: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(body).map_err(|source| FetchError::Json {
        url: url.to_string(),
        source,
    })
}
