use clap::Parser;
use tracing::error;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

mod cli;

use cli::CliArgs;

// Errors are reported on stdout; the exit status is always 0.
#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match args.into_config() {
        Ok(config) => booru_dl::run(config).await,
        Err(e) => error!("{}", e),
    }
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .with_level(verbose),
        )
        .with(log_filter(verbose, rust_log.as_deref()))
        .init();
}

/// `--verbose` forces debug; otherwise `RUST_LOG` decides, falling back to info.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
