//! Fetch-and-download orchestration
//!
//! [`Downloader::run`] performs one pass over the listing:
//! 1. fetch and validate the listing (fatal on failure, nothing is written)
//! 2. create the destination directory
//! 3. walk the posts in order, streaming each media URL into `NNN.ext`
//! 4. stop at the download cap or when the listing is exhausted
//!
//! Every step is awaited before the next one starts; there is no fan-out.

use crate::config::Config;
use crate::error::{DownloadError, Error, Result};
use crate::listing::fetch_listing;
use crate::naming::{sequential_file_name, url_extension};
use crate::types::{RecordOutcome, RunSummary};
use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

/// Downloads the media referenced by a listing into a directory
pub struct Downloader {
    config: Config,
    client: reqwest::Client,
}

impl Downloader {
    /// Create a downloader for the given configuration
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client cannot be
    /// built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Run one fetch-and-download pass
    ///
    /// Failures of individual media downloads are recorded in the returned summary and
    /// do not stop the run.
    ///
    /// # Errors
    /// - [`Error::Listing`] if the listing cannot be fetched, parsed or is not an array
    /// - [`Error::CreateDir`] if the destination directory cannot be created
    /// - [`Error::Io`] if a media file cannot be created or written
    pub async fn run(&self) -> Result<RunSummary> {
        info!(url = %self.config.listing_url, "fetching listing");
        let records = fetch_listing(&self.client, &self.config.listing_url).await?;

        let destination = self.config.download_dir.clone();
        tokio::fs::create_dir_all(&destination)
            .await
            .map_err(|e| Error::CreateDir {
                path: destination.clone(),
                source: e,
            })?;

        let mut downloaded = 0usize;
        let mut cap_reached = false;
        let mut outcomes = Vec::with_capacity(records.len().min(self.config.max_downloads));

        for (index, post) in records.iter().enumerate() {
            if downloaded >= self.config.max_downloads {
                cap_reached = true;
                debug!(
                    max_downloads = self.config.max_downloads,
                    remaining = records.len() - index,
                    "download cap reached"
                );
                break;
            }

            let Some(url) = post.media_url() else {
                warn!(index, "'file_url' not found in post {}", index);
                outcomes.push(RecordOutcome::MissingUrl { index });
                continue;
            };

            let file_name = sequential_file_name(downloaded, &url_extension(url));
            let path = destination.join(&file_name);

            match self.download_media(url, &path).await {
                Ok(bytes) => {
                    info!(file = %file_name, bytes, "Downloaded: {}", file_name);
                    downloaded += 1;
                    outcomes.push(RecordOutcome::Downloaded {
                        index,
                        file_name,
                        bytes,
                    });
                }
                Err(Error::Download(e)) => {
                    let failed = e.url();
                    error!(url = %failed, error = %e, "Error downloading image from {}: {}", failed, e);
                    outcomes.push(RecordOutcome::Failed {
                        index,
                        url: failed.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            downloaded,
            destination = %destination.display(),
            "Successfully downloaded {} images to '{}'",
            downloaded,
            destination.display()
        );

        Ok(RunSummary {
            downloaded,
            destination,
            cap_reached,
            outcomes,
        })
    }

    /// Stream one media file to `path`, returning the number of bytes written
    ///
    /// The file is only created once the server has answered with a success status.
    /// If the body stream breaks midway the partial file is left in place.
    ///
    /// # Errors
    /// - [`Error::Download`] for transport or HTTP status failures
    /// - [`Error::Io`] if the file cannot be created or written
    pub async fn download_media(&self, url: &str, path: &Path) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DownloadError::Stream {
                url: url.to_string(),
                written,
                source: e,
            })?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(url = %url, path = %path.display(), bytes = written, "media written");
        Ok(written)
    }
}
