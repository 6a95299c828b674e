//! Listing-page handlers: turn genre and alphabetic index pages into
//! follow-up requests.

use std::sync::LazyLock;

use itunesbot_core::{ConfigError, CrawlOptions};
use scraper::{Html, Selector};

use crate::link_filter::LinkFilter;
use crate::types::{CrawlRequest, FetchedPage, Handler};

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static NEXT_PAGES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#selectedgenre > ul:nth-child(2) > li > a")
        .expect("valid pagination selector")
});

/// Builds the seed requests for a crawl.
///
/// Popular mode fetches the start page once as a category listing. Otherwise
/// one alphabetic index request is made per letter bucket in the configured
/// inclusive range.
///
/// # Errors
///
/// Returns a [`ConfigError`] when a letter is not a bucket or the range is
/// reversed.
pub fn start_requests(options: &CrawlOptions) -> Result<Vec<CrawlRequest>, ConfigError> {
    if options.popular {
        tracing::info!(start = %options.start, "popular apps fetch started");
        return Ok(vec![CrawlRequest::new(&options.start, Handler::Category)]);
    }

    let letters = options.letter_range()?;
    tracing::info!(
        start = %options.start,
        start_letter = %options.start_letter,
        end_letter = %options.end_letter,
        "alphabetic fetch started"
    );
    Ok(letters
        .iter()
        .map(|letter| {
            let url = letter_url(&options.start, *letter);
            tracing::debug!(url = %url, "seed request");
            CrawlRequest::new(url, Handler::Alphabetic)
        })
        .collect())
}

/// Appends `letter=<X>` to `base`, joining with `&` when a query already exists.
fn letter_url(base: &str, letter: char) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}letter={letter}")
}

/// Handles a genre or popularity listing: one detail request per app link.
#[must_use]
pub fn parse_category(page: &FetchedPage, filter: &LinkFilter) -> Vec<CrawlRequest> {
    if !page.is_ok() {
        tracing::warn!(url = %page.url, status = page.status, "listing page returned non-200 response");
        return Vec::new();
    }
    let document = Html::parse_document(&page.body);
    detail_requests(&document, filter)
}

/// Handles an alphabetic index page: detail requests for its app links,
/// then a category request for every sub-page in its page bar.
#[must_use]
pub fn parse_alphabetic(page: &FetchedPage, filter: &LinkFilter) -> Vec<CrawlRequest> {
    if !page.is_ok() {
        tracing::warn!(url = %page.url, status = page.status, "listing page returned non-200 response");
        return Vec::new();
    }
    let document = Html::parse_document(&page.body);
    let mut requests = detail_requests(&document, filter);

    let base = reqwest::Url::parse(&page.url).ok();
    for anchor in document.select(&NEXT_PAGES) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        let url = match &base {
            Some(base) => match base.join(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    tracing::debug!(href, error = %e, "unresolvable page link skipped");
                    continue;
                }
            },
            None => href.to_owned(),
        };
        tracing::info!(url = %url, "app list page request queued");
        requests.push(CrawlRequest::new(url, Handler::Category));
    }
    requests
}

fn detail_requests(document: &Html, filter: &LinkFilter) -> Vec<CrawlRequest> {
    document
        .select(&ANCHORS)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| {
            let keep = filter.matches(href);
            if !keep {
                tracing::debug!(href, "non-app link filtered");
            }
            keep
        })
        .map(|href| {
            tracing::info!(url = %href, "app request queued");
            CrawlRequest::new(href, Handler::Detail)
        })
        .collect()
}
