//! Configuration types for booru-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Safebooru listing used when no URL is configured
pub const DEFAULT_LISTING_URL: &str = "https://safebooru.org/index.php?page=dapi&s=post&q=index&tags=yuuka_%28blue_archive%29+&limit=300&json=1";

/// Upper bound on successful downloads per run.
///
/// This allows 301 files (`000` through `300`) while the default listing asks for
/// 300 posts. Kept as observed rather than silently changed.
pub const DEFAULT_MAX_DOWNLOADS: usize = 301;

/// Main configuration for a download run
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```
/// use booru_dl::Config;
///
/// let config: Config = serde_json::from_str(r#"{ "download_dir": "yuuka" }"#).unwrap();
/// assert_eq!(config.download_dir, std::path::PathBuf::from("yuuka"));
/// assert_eq!(config.max_downloads, 301);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Listing endpoint returning a JSON array of posts
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Destination directory (default: "images")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Maximum number of successful downloads (default: 301)
    #[serde(default = "default_max_downloads")]
    pub max_downloads: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (None = client default, no timeout)
    #[serde(default, with = "optional_duration_serde")]
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            download_dir: default_download_dir(),
            max_downloads: default_max_downloads(),
            user_agent: default_user_agent(),
            timeout: None,
        }
    }
}

impl Config {
    /// Build a config for a listing URL and destination, keeping other defaults
    pub fn new(listing_url: impl Into<String>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            listing_url: listing_url.into(),
            download_dir: download_dir.into(),
            ..Default::default()
        }
    }

    /// Load a config from a JSON file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(
                "config_file",
                format!("failed to read config file '{}': {}", path.display(), e),
            )
        })?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check the values a run cannot work without
    pub fn validate(&self) -> Result<()> {
        if self.listing_url.trim().is_empty() {
            return Err(Error::config("listing_url", "listing URL must not be empty"));
        }
        if self.max_downloads == 0 {
            return Err(Error::config(
                "max_downloads",
                "max_downloads must be greater than zero",
            ));
        }
        if self.download_dir.as_os_str().is_empty() {
            return Err(Error::config(
                "download_dir",
                "download directory must not be empty",
            ));
        }
        Ok(())
    }
}

fn default_listing_url() -> String {
    DEFAULT_LISTING_URL.to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_max_downloads() -> usize {
    DEFAULT_MAX_DOWNLOADS
}

fn default_user_agent() -> String {
    concat!("booru-dl/", env!("CARGO_PKG_VERSION")).to_string()
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
