//! Error types for booru-dl
//!
//! Errors are split by the scope they terminate:
//! - [`ListingError`] ends the whole run (the listing could not be fetched, parsed or
//!   did not have the expected shape)
//! - [`DownloadError`] ends a single record; the run continues with the next post
//! - everything else in [`Error`] (I/O, configuration, client setup) ends the run and
//!   is reported by the top-level wrapper

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for booru-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for booru-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "listing_url")
        key: Option<String>,
    },

    /// The listing endpoint could not be used
    #[error("listing error: {0}")]
    Listing(#[from] ListingError),

    /// A single media download failed
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// I/O error (directory creation, file create/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create the destination directory
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Serialization error (config file parsing)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors that abort the run before any file is written
#[derive(Debug, Error)]
pub enum ListingError {
    /// Connection failure, timeout or invalid URL
    #[error("error fetching JSON from {url}: {source}")]
    Request {
        /// Listing URL
        url: String,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("error fetching JSON from {url}: HTTP {status}")]
    Status {
        /// Listing URL
        url: String,
        /// HTTP status code returned
        status: u16,
    },

    /// The response body could not be read
    #[error("error reading listing body from {url}: {source}")]
    Body {
        /// Listing URL
        url: String,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// The body is not valid JSON
    #[error("error decoding JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The body is valid JSON but not an array of posts
    #[error("expected a list of posts in the JSON response, got {found}")]
    NotASequence {
        /// JSON kind that was found instead (e.g. "object", "string")
        found: &'static str,
    },
}

/// Errors scoped to a single media download
///
/// None of these stop the run: the record is skipped and the download counter is
/// left unchanged.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Connection failure, timeout or invalid URL
    #[error("{source}")]
    Request {
        /// Media URL
        url: String,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// The media server answered with a non-success status
    #[error("HTTP status {status}")]
    Status {
        /// Media URL
        url: String,
        /// HTTP status code returned
        status: u16,
    },

    /// The body stream broke after the file was created
    #[error("stream interrupted after {written} bytes: {source}")]
    Stream {
        /// Media URL
        url: String,
        /// Bytes written to disk before the failure
        written: u64,
        /// Underlying transport error
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// URL of the media file that failed
    pub fn url(&self) -> &str {
        match self {
            DownloadError::Request { url, .. }
            | DownloadError::Status { url, .. }
            | DownloadError::Stream { url, .. } => url,
        }
    }
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
