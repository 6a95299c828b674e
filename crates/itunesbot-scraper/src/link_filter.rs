//! Recognizes app detail-page links among the anchors of a listing page.

use regex::Regex;

/// Storefront host crawled when none is configured.
pub const DEFAULT_STORE_HOST: &str = "itunes.apple.com";

/// Matches `<scheme>://<host>/<region>/app/<anything>` for one storefront host.
///
/// Navigation links on the same host (`/us/genre/...`, `/us/charts/...`) do
/// not match and are dropped silently.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    pattern: Regex,
}

impl LinkFilter {
    /// Builds a filter for `host`, e.g. `"itunes.apple.com"`.
    #[must_use]
    pub fn new(host: &str) -> Self {
        let pattern = format!(r"^https?://{}/\w{{2}}/app/.*", regex::escape(host));
        Self {
            pattern: Regex::new(&pattern).expect("escaped host always yields a valid regex"),
        }
    }

    #[must_use]
    pub fn matches(&self, href: &str) -> bool {
        self.pattern.is_match(href)
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_HOST)
    }
}
