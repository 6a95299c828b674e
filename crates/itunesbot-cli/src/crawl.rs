use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use itunesbot_core::{AppConfig, AppRecord, CrawlOptions};
use itunesbot_scraper::{
    extract_record, start_requests, Crawler, FetchedPage, JsonLinesSink, LinkFilter,
    RecordSink, StoreClient,
};

/// Builds a [`StoreClient`] from the runtime config.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub(crate) fn build_store_client(config: &AppConfig) -> anyhow::Result<StoreClient> {
    StoreClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .context("failed to build store HTTP client")
}

/// Crawls from the configured start page, writing records to stdout as JSON lines.
///
/// When `dry_run` is `true` the seed requests are printed and nothing is fetched.
///
/// # Errors
///
/// Returns an error if the letter range is invalid, the HTTP client cannot be
/// built, or stdout cannot be written. Per-page fetch failures are logged and
/// become failed records, not errors.
pub(crate) async fn run_crawl(
    config: &AppConfig,
    options: &CrawlOptions,
    max_requests: Option<usize>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let seeds = start_requests(options).context("invalid crawl options")?;

    if dry_run {
        for seed in &seeds {
            println!("{:?}\t{}", seed.handler, seed.url);
        }
        println!("dry-run: would start from {} requests", seeds.len());
        return Ok(());
    }

    let client = build_store_client(config)?;
    let crawler = Crawler::new(client, LinkFilter::new(&config.store_host))
        .with_delay(Duration::from_millis(config.inter_request_delay_ms))
        .with_max_requests(max_requests);

    let mut sink = JsonLinesSink::new(std::io::stdout());
    let summary = crawler.run(seeds, &mut sink).await?;
    if summary.abandoned > 0 {
        tracing::warn!(
            abandoned = summary.abandoned,
            "crawl stopped with requests still queued"
        );
    }
    Ok(())
}

/// Reads a saved detail page from disk and extracts its record.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub(crate) fn extract_file(path: &Path, url: &str, status: u16) -> anyhow::Result<AppRecord> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(extract_record(&FetchedPage::new(url, status, body)))
}

/// Runs the detail extractor on a saved page and prints the record as one JSON line.
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdout cannot be written.
pub(crate) fn run_extract(path: &Path, url: &str, status: u16) -> anyhow::Result<()> {
    let record = extract_file(path, url, status)?;
    JsonLinesSink::new(std::io::stdout()).accept(record)?;
    Ok(())
}
