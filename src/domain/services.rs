//! Boundary contracts for the pipeline's collaborators
//!
//! The pipeline drives two external collaborators: an extractor that turns
//! the rendered updates page into raw tuples, and a store that owns the
//! persisted per-locale documents. Both are async traits so the pipeline
//! can be exercised against scripted fakes.

use async_trait::async_trait;
use thiserror::Error;

/// One update as extracted from the page, before normalization and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUpdate {
    pub title: String,
    /// The rendered date text, e.g. `January 10, 2024`. Parsed by the
    /// pipeline; a record whose date text cannot be parsed is dropped.
    pub date_text: String,
    pub description_html: String,
}

/// Failure extracting records for one locale. Aborts that locale's run only.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Http { status: u16, url: String },

    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("unexpected markup: {reason}")]
    UnexpectedMarkup { reason: String },
}

impl ExtractionError {
    /// Whether retrying the fetch could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Network { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::UnexpectedMarkup { .. } => false,
        }
    }
}

/// Failure reading or writing a persisted feed document.
///
/// `NotFound` is a valid state, not corruption: it is how a locale's first
/// run presents. Readable-but-malformed documents are the serializer's
/// concern and are reported separately.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no feed document stored for locale '{code}'")]
    NotFound { code: String },

    #[error("feed document I/O failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Extracts raw update tuples from the updates page of one locale.
#[async_trait]
pub trait UpdateExtractor: Send + Sync {
    async fn extract(&self, language_name: &str) -> Result<Vec<RawUpdate>, ExtractionError>;
}

/// Owns the persisted feed document of each locale.
///
/// Writes are all-or-nothing: a failed write must never leave a partial
/// document behind.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn read(&self, locale_code: &str) -> Result<Vec<u8>, StoreError>;
    async fn write(&self, locale_code: &str, bytes: &[u8]) -> Result<(), StoreError>;
}
