use booru_dl::listing::safebooru_listing_url;
use booru_dl::{Config, Result};
use clap::Parser;
use std::path::PathBuf;

/// Define CLI arguments
#[derive(Debug, Parser)]
#[command(
    version,
    about = "Download images from an image-board JSON listing",
    long_about = "Fetches a JSON listing of posts and downloads each post's file_url\n\
                  into a directory, naming files 000.ext, 001.ext, ... in download order.\n\
                  \n\
                  Without arguments the built-in Safebooru listing is downloaded into ./images."
)]
pub struct CliArgs {
    /// Listing URL returning a JSON array of posts
    #[arg(short, long, conflicts_with = "tags")]
    pub url: Option<String>,

    /// Safebooru tag query used to build the listing URL
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Number of posts to request when using --tags
    #[arg(short, long, default_value_t = 300)]
    pub limit: usize,

    /// Directory where downloaded files are saved
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of files to download
    #[arg(short = 'n', long)]
    pub max_downloads: Option<usize>,

    /// JSON config file; command-line flags take precedence over its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Resolve the run configuration: defaults, then the config file, then flags
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(url) = self.url {
            config.listing_url = url;
        } else if let Some(tags) = &self.tags {
            config.listing_url = safebooru_listing_url(tags, self.limit)?.to_string();
        }
        if let Some(output) = self.output {
            config.download_dir = output;
        }
        if let Some(max_downloads) = self.max_downloads {
            config.max_downloads = max_downloads;
        }

        Ok(config)
    }
}
