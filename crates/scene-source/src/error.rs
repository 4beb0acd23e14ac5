//! Error types for scene data sources
//!
//! Three failure classes reach callers:
//! - invalid arguments, reported before any work is done
//! - processing failures from the document processor
//! - fetch failures, which are also broadcast on the source's error channel

use scene_entity::ProcessError;
use std::path::PathBuf;

/// Errors while resolving a URL to a parsed document
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request could not be completed
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Local file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document exceeds the configured size limit
    #[error("document at {url} too large: {size} bytes (max: {max})")]
    TooLarge { url: String, size: u64, max: u64 },

    /// Body is not valid JSON
    #[error("document at {url} is not valid JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// URL scheme has no fetcher
    #[error("unsupported url scheme: '{0}'")]
    UnsupportedScheme(String),
}

impl FetchError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by [`SceneDataSource`](crate::SceneDataSource) operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Required argument missing
    #[error("invalid argument: {0} is required")]
    InvalidArgument(&'static str),

    /// Document processor rejected the document
    #[error("processing failed: {0}")]
    Process(#[from] ProcessError),

    /// Document could not be fetched
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl SourceError {
    /// Check if error is a missing-argument failure
    #[inline]
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias for data source operations
pub type SourceResult<T> = Result<T, SourceError>;
