pub mod client;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod link_filter;
pub mod normalize;
mod rate_limit;
pub mod traverse;
pub mod types;

pub use client::{PageFetcher, StoreClient};
pub use crawler::{CrawlSummary, Crawler, JsonLinesSink, RecordSink};
pub use error::ScraperError;
pub use extract::{extract_record, Layout, LayoutStrategy};
pub use link_filter::LinkFilter;
pub use traverse::{parse_alphabetic, parse_category, start_requests};
pub use types::{CrawlRequest, FetchedPage, Handler};
