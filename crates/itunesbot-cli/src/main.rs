mod crawl;

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use itunesbot_core::{CrawlOptions, DEFAULT_START_URL};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "itunesbot")]
#[command(about = "App Store listing crawler")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl a genre listing and print one JSON record per app page
    Crawl {
        #[command(flatten)]
        target: CrawlTarget,
        /// Stop after this many requests
        #[arg(long)]
        max_requests: Option<usize>,
        /// Print the start requests without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the detail extractor on a saved app page
    Extract {
        /// HTML file to read
        #[arg(long)]
        file: PathBuf,
        /// URL the page was fetched from
        #[arg(long)]
        url: String,
        /// HTTP status the page was served with
        #[arg(long, default_value_t = 200)]
        status: u16,
    },
}

/// Where a crawl starts and how it sweeps the listing.
#[derive(Debug, Clone, Args)]
struct CrawlTarget {
    /// Genre listing URL to start from
    #[arg(long, env = "ITUNESBOT_START", default_value = DEFAULT_START_URL)]
    start: String,
    /// First alphabetic bucket (A-Z or *)
    #[arg(long, env = "ITUNESBOT_START_LETTER", default_value = "A")]
    start_letter: String,
    /// Last alphabetic bucket (A-Z or *)
    #[arg(long, env = "ITUNESBOT_END_LETTER", default_value = "Z")]
    end_letter: String,
    /// Only crawl the popular apps shown on the start page
    #[arg(
        long,
        env = "ITUNESBOT_POPULAR",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    popular: bool,
}

impl From<CrawlTarget> for CrawlOptions {
    fn from(target: CrawlTarget) -> Self {
        Self {
            start: target.start,
            start_letter: target.start_letter,
            end_letter: target.end_letter,
            popular: target.popular,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = itunesbot_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Crawl {
            target,
            max_requests,
            dry_run,
        }) => crawl::run_crawl(&config, &target.into(), max_requests, dry_run).await?,
        Some(Commands::Extract { file, url, status }) => {
            crawl::run_extract(&file, &url, status)?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
