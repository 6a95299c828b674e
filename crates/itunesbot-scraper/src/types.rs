//! Values exchanged between the crawl driver and the page handlers.

/// Which handler a fetched page is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Genre or popularity listing: emits detail requests only.
    Category,
    /// Alphabetic index page: emits detail requests and follow-up listing pages.
    Alphabetic,
    /// App detail page: produces one record.
    Detail,
}

/// A URL waiting to be fetched, tagged with the handler for its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub url: String,
    pub handler: Handler,
}

impl CrawlRequest {
    #[must_use]
    pub fn new(url: impl Into<String>, handler: Handler) -> Self {
        Self {
            url: url.into(),
            handler,
        }
    }
}

/// A response as seen by the handlers: final URL, status and raw markup.
///
/// Non-2xx responses are delivered as pages too; handlers decide what a
/// failing status means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
