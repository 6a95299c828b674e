//! Crawl driver: a FIFO of pending requests, one fetch at a time, each
//! response routed to the handler its request was tagged with.

use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

use itunesbot_core::AppRecord;

use crate::client::PageFetcher;
use crate::error::ScraperError;
use crate::extract::extract_record;
use crate::link_filter::LinkFilter;
use crate::traverse::{parse_alphabetic, parse_category};
use crate::types::{CrawlRequest, FetchedPage, Handler};

/// Destination for records as they are produced.
pub trait RecordSink {
    /// # Errors
    ///
    /// Returns [`ScraperError::Sink`] or [`ScraperError::Serialize`] when the
    /// record cannot be stored; the crawl stops on the first such error.
    fn accept(&mut self, record: AppRecord) -> Result<(), ScraperError>;
}

impl RecordSink for Vec<AppRecord> {
    fn accept(&mut self, record: AppRecord) -> Result<(), ScraperError> {
        self.push(record);
        Ok(())
    }
}

/// Writes each record as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn accept(&mut self, record: AppRecord) -> Result<(), ScraperError> {
        serde_json::to_writer(&mut self.writer, &record).map_err(|source| {
            ScraperError::Serialize {
                url: record.url.clone(),
                source,
            }
        })?;
        self.writer
            .write_all(b"\n")
            .and_then(|()| self.writer.flush())
            .map_err(|source| ScraperError::Sink {
                url: record.url.clone(),
                source,
            })
    }
}

/// Counters reported when a crawl finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Requests actually sent (retries not counted).
    pub requests: usize,
    pub records: usize,
    pub failed_records: usize,
    /// Requests that produced no response after all retries.
    pub transport_errors: usize,
    /// Requests still queued when `max_requests` was reached.
    pub abandoned: usize,
}

/// Sequential crawl driver over any [`PageFetcher`].
pub struct Crawler<F> {
    fetcher: F,
    filter: LinkFilter,
    delay: Duration,
    max_requests: Option<usize>,
}

impl<F: PageFetcher> Crawler<F> {
    #[must_use]
    pub fn new(fetcher: F, filter: LinkFilter) -> Self {
        Self {
            fetcher,
            filter,
            delay: Duration::ZERO,
            max_requests: None,
        }
    }

    /// Pause inserted between consecutive requests.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Stops the crawl after this many requests; `None` runs until the queue drains.
    #[must_use]
    pub fn with_max_requests(mut self, max_requests: Option<usize>) -> Self {
        self.max_requests = max_requests;
        self
    }

    /// Routes one response to its handler. Listing handlers return follow-up
    /// requests; the detail handler returns a record.
    #[must_use]
    pub fn dispatch(
        &self,
        request: &CrawlRequest,
        page: &FetchedPage,
    ) -> (Vec<CrawlRequest>, Option<AppRecord>) {
        match request.handler {
            Handler::Category => (parse_category(page, &self.filter), None),
            Handler::Alphabetic => (parse_alphabetic(page, &self.filter), None),
            Handler::Detail => (Vec::new(), Some(extract_record(page))),
        }
    }

    /// Drains the request queue starting from `seeds`, pushing every record
    /// into `sink` as soon as it is built.
    ///
    /// Transport failures never abort the crawl: a detail request that gets
    /// no response becomes a failed record, a listing request is skipped.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `sink`.
    pub async fn run<S: RecordSink>(
        &self,
        seeds: Vec<CrawlRequest>,
        sink: &mut S,
    ) -> Result<CrawlSummary, ScraperError> {
        let mut queue: VecDeque<CrawlRequest> = seeds.into();
        let mut summary = CrawlSummary::default();

        while let Some(request) = queue.pop_front() {
            if self.max_requests.is_some_and(|max| summary.requests >= max) {
                summary.abandoned = queue.len() + 1;
                tracing::info!(
                    max_requests = summary.requests,
                    abandoned = summary.abandoned,
                    "request limit reached, stopping crawl"
                );
                break;
            }
            if summary.requests > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            summary.requests += 1;
            tracing::info!(url = %request.url, handler = ?request.handler, "request dispatched");

            let (follow_ups, record) = match self.fetcher.fetch(&request.url).await {
                Ok(page) => self.dispatch(&request, &page),
                Err(e) => {
                    summary.transport_errors += 1;
                    tracing::warn!(
                        url = %request.url,
                        handler = ?request.handler,
                        error = %e,
                        "request failed after retries"
                    );
                    let record = (request.handler == Handler::Detail)
                        .then(|| AppRecord::failed(&request.url));
                    (Vec::new(), record)
                }
            };

            if let Some(record) = record {
                summary.records += 1;
                if !record.is_success() {
                    summary.failed_records += 1;
                }
                sink.accept(record)?;
            }
            queue.extend(follow_ups);
        }

        tracing::info!(
            requests = summary.requests,
            records = summary.records,
            failed_records = summary.failed_records,
            transport_errors = summary.transport_errors,
            "crawl finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "crawler_test.rs"]
mod tests;
