//! # booru-dl
//!
//! Downloads the media files referenced by an image-board JSON listing.
//!
//! One run fetches the listing, then streams each post's `file_url` into the
//! destination directory as `000.jpg`, `001.png`, ... until the listing is exhausted
//! or the download cap is reached. A failed media download is reported and skipped;
//! the next successful download takes its file name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use booru_dl::{Config, Downloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new(
//!         "https://safebooru.org/index.php?page=dapi&s=post&q=index&tags=cat&limit=20&json=1",
//!         "cats",
//!     );
//!
//!     let summary = Downloader::new(config)?.run().await?;
//!     println!("{} files in {}", summary.downloaded, summary.destination.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Fetch-and-download orchestration
pub mod downloader;
/// Error types
pub mod error;
/// Listing fetch and validation
pub mod listing;
/// Output file naming
pub mod naming;
/// Core types
pub mod types;

use std::path::Path;

// Re-export commonly used types
pub use config::Config;
pub use downloader::Downloader;
pub use error::{DownloadError, Error, ListingError, Result};
pub use types::{PostRecord, RecordOutcome, RunSummary};

/// Run one download pass, reporting every failure through the log
///
/// Nothing is returned to the caller: listing failures, configuration problems and
/// unexpected I/O errors are logged and end the run quietly.
///
/// # Example
///
/// ```no_run
/// use booru_dl::{Config, run};
///
/// #[tokio::main]
/// async fn main() {
///     run(Config::default()).await;
/// }
/// ```
pub async fn run(config: Config) {
    let result = match Downloader::new(config) {
        Ok(downloader) => downloader.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => {
            tracing::debug!(
                downloaded = summary.downloaded,
                missing = summary.missing(),
                failed = summary.failed(),
                cap_reached = summary.cap_reached,
                "run finished"
            );
        }
        Err(Error::Listing(e)) => tracing::error!("{}", e),
        Err(e @ Error::Config { .. }) => tracing::error!("{}", e),
        Err(e) => tracing::error!(error = ?e, "An unexpected error occurred: {}", e),
    }
}

/// Run one download pass for a listing URL and destination directory
///
/// Uses the default download cap and HTTP settings. See [`run`].
pub async fn run_url(listing_url: &str, destination_dir: impl AsRef<Path>) {
    run(Config::new(listing_url, destination_dir.as_ref())).await
}
