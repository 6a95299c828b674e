use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel stored in textual fields whose selector matched nothing.
pub const NOT_FOUND: &str = "Not Found";

/// Outcome of a single detail-page crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    Success,
    Fail,
}

/// One app listing scraped from a storefront detail page.
///
/// Only `url` and `crawl_status` are guaranteed. A failed crawl carries
/// nothing else; a successful one carries whatever the page layout exposed,
/// with `"Not Found"` / `0` standing in for selectors that matched nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub url: String,
    pub crawl_status: CrawlStatus,

    /// Two-letter storefront region taken from the URL, e.g. `"us"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<String>,
    /// Numeric app id from the URL with the `id` prefix removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Display name of the `geo` region; unset when the code is unmapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_lang: Option<String>,
    /// Browser title bar text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Storefront page listing the publisher's other apps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_store_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_home_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Language-independent genre id, or `"na"` when the genre link is malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// "What's new" text for the current version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating_reasons: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_value_cv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count_cv: Option<u64>,
    /// Mirrors `rating_value_cv`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating_cv: Option<f64>,
    /// Accessibility label of the current-version rating block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_cv: Option<String>,
    /// Accessibility label of the all-versions rating block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_av: Option<String>,
    /// Parsed out of `rating_av`; only set when that label mentions `Ratings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count_av: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_inapp: Option<bool>,
    /// `"||"`-terminated list of in-app purchase entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inapp_info: Option<String>,

    /// `"||"`-terminated list of "customers also bought" links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub also_bought: Option<String>,
    /// `"|"`-terminated list of `author:review` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_reviews: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub more_by_developer: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub similar_apps: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designed_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_watch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_devices: Option<Vec<String>>,

    /// Metadata rows whose label has no dedicated field, keyed by the
    /// standardized label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl AppRecord {
    /// A record for a page whose fetch did not return `200`.
    #[must_use]
    pub fn failed(url: impl Into<String>) -> Self {
        Self::empty(url.into(), CrawlStatus::Fail)
    }

    /// A successful record before any extraction rule has run.
    ///
    /// `for_watch` starts at `false`; every other field is unset.
    #[must_use]
    pub fn success(url: impl Into<String>) -> Self {
        let mut record = Self::empty(url.into(), CrawlStatus::Success);
        record.for_watch = Some(false);
        record
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.crawl_status == CrawlStatus::Success
    }

    fn empty(url: String, crawl_status: CrawlStatus) -> Self {
        Self {
            url,
            crawl_status,
            geo: None,
            app_id: None,
            country: None,
            html_lang: None,
            title: None,
            name: None,
            publisher: None,
            publisher_store_site: None,
            publisher_home_site: None,
            support_site: None,
            privacy_policy: None,
            copyright: None,
            seller: None,
            description: None,
            pricing: None,
            is_paid: None,
            category_name: None,
            category_id: None,
            version: None,
            version_remarks: None,
            date_updated: None,
            date_published: None,
            size: None,
            languages: None,
            content_rating: None,
            content_rating_reasons: None,
            compatibility: None,
            rating_value_cv: None,
            review_count_cv: None,
            star_rating_cv: None,
            rating_cv: None,
            rating_av: None,
            review_count_av: None,
            has_inapp: None,
            inapp_info: None,
            also_bought: None,
            customer_reviews: None,
            more_by_developer: BTreeMap::new(),
            similar_apps: BTreeMap::new(),
            designed_for: None,
            for_watch: None,
            supported_devices: None,
            extras: BTreeMap::new(),
        }
    }
}
