//! Detail-page extraction: one fetched app page in, one [`AppRecord`] out.
//!
//! The storefront has served two markup generations for the same data. Each
//! is handled by a [`LayoutStrategy`]; [`Layout::detect`] probes the parsed
//! document and picks one per page. Fields that do not depend on the layout
//! (page language, browser title, region and app id from the URL) are filled
//! here, around the strategy.

mod current;
mod dom;
mod legacy;

use std::sync::LazyLock;

use itunesbot_core::{country_name, AppRecord};
use scraper::{Html, Selector};

use crate::normalize::{geo_and_app_id, text_or_not_found};
use crate::types::FetchedPage;

pub use current::CurrentLayout;
pub use legacy::LegacyLayout;

static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| dom::css("head > title"));
static CURRENT_MARKER: LazyLock<Selector> = LazyLock::new(|| {
    dom::css("h1.product-header__title, .information-list__item")
});

/// A set of selector rules for one generation of detail-page markup.
///
/// Implementations only write the fields their markup exposes. Every rule is
/// independent: a missing element leaves that one field at its default.
pub trait LayoutStrategy {
    fn layout(&self) -> Layout;

    fn extract(&self, document: &Html, record: &mut AppRecord);
}

/// Detail-page markup generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Table-based page built around `#left-stack` and `#content`.
    Legacy,
    /// Card/section page with `information-list` metadata pairs.
    Current,
}

impl Layout {
    /// Picks the layout of a parsed page. Pages without any marker of the
    /// current markup are treated as legacy.
    #[must_use]
    pub fn detect(document: &Html) -> Self {
        if dom::exists(document, &CURRENT_MARKER) {
            Self::Current
        } else {
            Self::Legacy
        }
    }

    #[must_use]
    pub fn strategy(self) -> &'static dyn LayoutStrategy {
        match self {
            Self::Legacy => &LegacyLayout,
            Self::Current => &CurrentLayout,
        }
    }
}

/// Builds the record for one fetched detail page.
///
/// A non-200 page yields [`AppRecord::failed`] and nothing else. Otherwise
/// the record is marked successful and populated on a best-effort basis;
/// extraction never fails once a response exists.
#[must_use]
pub fn extract_record(page: &FetchedPage) -> AppRecord {
    if !page.is_ok() {
        tracing::warn!(url = %page.url, status = page.status, "app page returned non-200 response");
        return AppRecord::failed(&page.url);
    }

    let document = Html::parse_document(&page.body);
    let strategy = Layout::detect(&document).strategy();
    tracing::info!(url = %page.url, layout = ?strategy.layout(), "app details extraction started");

    let mut record = AppRecord::success(&page.url);
    fill_page_metadata(&document, &mut record);
    strategy.extract(&document, &mut record);
    fill_identity(&page.url, &mut record);

    tracing::info!(url = %page.url, "app details extraction done");
    record
}

fn fill_page_metadata(document: &Html, record: &mut AppRecord) {
    let lang = document
        .root_element()
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned);
    record.html_lang = Some(text_or_not_found(lang));
    record.title = Some(text_or_not_found(dom::first_text(
        document.root_element(),
        &PAGE_TITLE,
    )));
}

fn fill_identity(url: &str, record: &mut AppRecord) {
    let (geo, app_id) = geo_and_app_id(url);
    record.country = geo.as_deref().and_then(country_name).map(str::to_owned);
    record.geo = geo;
    record.app_id = app_id;
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
