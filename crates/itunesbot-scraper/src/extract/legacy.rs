use std::sync::LazyLock;

use itunesbot_core::AppRecord;
use scraper::{ElementRef, Html, Selector};

use super::dom::{
    child_element, css, element_text, first_attr, first_text, own_text, own_text_nodes,
};
use super::{Layout, LayoutStrategy};
use crate::normalize::{
    category_id_from_url, join_delimited, paid_from_pricing_text, rating_count_from_text,
    rating_value_from_text, remove_line_breaks, review_count_from_label, text_or_not_found,
    ALSO_BOUGHT_SEP, INAPP_FIELD_SEP, INAPP_ITEM_SEP, REVIEW_FIELD_SEP, REVIEW_ITEM_SEP,
};

// Header and links
static NAME: LazyLock<Selector> = LazyLock::new(|| css("#title > div.left > h1"));
static PUBLISHER: LazyLock<Selector> = LazyLock::new(|| css("#title > div.left > h2"));
static PUBLISHER_STORE: LazyLock<Selector> = LazyLock::new(|| css("#title > div.right > a"));
static PUBLISHER_HOME: LazyLock<Selector> = LazyLock::new(|| {
    css("#content > div > div.center-stack > div.app-links > a:nth-child(1)")
});
static SUPPORT: LazyLock<Selector> = LazyLock::new(|| {
    css("#content > div > div.center-stack > div.app-links > a:nth-child(2)")
});

// Metadata rows and their parts
static METADATA_ROWS: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div.lockup.product.application > ul > li"));
static ROW_OFFERS: LazyLock<Selector> =
    LazyLock::new(|| css(r#"span[itemprop*="offers"] > div"#));
static ROW_LINK_SPAN: LazyLock<Selector> = LazyLock::new(|| css("a > span"));
static ROW_LINK: LazyLock<Selector> = LazyLock::new(|| css("a"));
static ROW_DATE: LazyLock<Selector> = LazyLock::new(|| css("span:nth-child(2)"));
static ROW_VERSION: LazyLock<Selector> =
    LazyLock::new(|| css(r#"span[itemprop*="softwareVersion"]"#));
static ROW_SPAN: LazyLock<Selector> = LazyLock::new(|| css("span"));
static ROW_AUTHOR: LazyLock<Selector> = LazyLock::new(|| css(r#"span[itemprop*="author"] > span"#));

// Lockup extras
static CONTENT_RATING: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div.lockup.product.application > div.app-rating > a"));
static CONTENT_RATING_FALLBACK: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div.lockup.product.application > div > a"));
static CONTENT_RATING_REASONS: LazyLock<Selector> = LazyLock::new(|| {
    css("#left-stack > div.lockup.product.application > div.app-rating > ul > li")
});
static COMPATIBILITY: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div:nth-of-type(1) > p > span:nth-of-type(2)"));

// Customer ratings
static RATING_CV: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div.extra-list.customer-ratings > div:nth-child(3)"));
static RATING_AV: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div.extra-list.customer-ratings > div:nth-child(5)"));
static RATING_VALUE_CV: LazyLock<Selector> = LazyLock::new(|| {
    css("#left-stack > div.extra-list.customer-ratings > div:nth-child(3) > span:nth-child(1)")
});
static RATING_COUNT_CV: LazyLock<Selector> = LazyLock::new(|| {
    css("#left-stack > div.extra-list.customer-ratings > div:nth-child(3) > span.rating-count")
});

// In-app purchases
static INAPP_HEADING: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div.extra-list.in-app-purchases > h4"));
static INAPP_ITEMS: LazyLock<Selector> =
    LazyLock::new(|| css("#left-stack > div.extra-list.in-app-purchases > ol > li"));

// Center stack
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| css("#content > div > div.center-stack > div:nth-child(1) > p"));
static VERSION_REMARKS: LazyLock<Selector> =
    LazyLock::new(|| css("#content > div > div.center-stack > div:nth-child(3) > p"));
static ALSO_BOUGHT: LazyLock<Selector> = LazyLock::new(|| {
    css("#content > div > div.center-stack > div:nth-child(6) > div.content > div > div")
});
static REVIEWS: LazyLock<Selector> =
    LazyLock::new(|| css("#content > div > div.center-stack > div.customer-reviews > div"));
static REVIEW_LABEL: LazyLock<Selector> = LazyLock::new(|| css("h5 > div"));
static REVIEW_BODY: LazyLock<Selector> = LazyLock::new(|| css("p"));

/// Table-based detail page (`#title`, `#left-stack`, `center-stack`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyLayout;

impl LayoutStrategy for LegacyLayout {
    fn layout(&self) -> Layout {
        Layout::Legacy
    }

    fn extract(&self, document: &Html, record: &mut AppRecord) {
        let root = document.root_element();

        record.name = Some(text_or_not_found(first_text(root, &NAME)));
        record.publisher = Some(text_or_not_found(first_text(root, &PUBLISHER)));
        record.publisher_store_site =
            Some(text_or_not_found(first_attr(root, &PUBLISHER_STORE, "href")));
        record.publisher_home_site =
            Some(text_or_not_found(first_attr(root, &PUBLISHER_HOME, "href")));
        record.support_site = Some(text_or_not_found(first_attr(root, &SUPPORT, "href")));

        for row in root.select(&METADATA_ROWS) {
            classify_row(row, record);
        }

        fill_content_rating(root, record);
        record.compatibility = Some(text_or_not_found(first_text(root, &COMPATIBILITY)));
        fill_ratings(root, record);
        fill_in_app(root, record);

        record.description = Some(joined_paragraphs(root, &DESCRIPTION));
        record.version_remarks = Some(joined_paragraphs(root, &VERSION_REMARKS));

        let also_bought = root.select(&ALSO_BOUGHT).filter_map(|tile| {
            child_element(tile, "a")
                .and_then(|a| a.value().attr("href"))
                .map(|href| [href.trim_end().to_owned()])
        });
        record.also_bought = Some(join_delimited(also_bought, ALSO_BOUGHT_SEP, ""));

        let reviews = root.select(&REVIEWS).map(|review| {
            let label = first_attr(review, &REVIEW_LABEL, "aria-label").unwrap_or_default();
            let body = review
                .select(&REVIEW_BODY)
                .next()
                .and_then(own_text)
                .unwrap_or_default();
            [remove_line_breaks(&label), remove_line_breaks(&body)]
        });
        record.customer_reviews = Some(join_delimited(reviews, REVIEW_ITEM_SEP, REVIEW_FIELD_SEP));
    }
}

/// Routes one metadata row to the first field whose rule matches it.
fn classify_row(row: ElementRef<'_>, record: &mut AppRecord) {
    if let Some(pricing) = first_text(row, &ROW_OFFERS) {
        record.is_paid = Some(paid_from_pricing_text(&pricing));
        record.pricing = Some(pricing);
        return;
    }

    let class = row.value().attr("class").unwrap_or_default();
    if class.contains("genre") {
        record.category_name = Some(text_or_not_found(first_text(row, &ROW_LINK_SPAN)));
        let href = text_or_not_found(first_attr(row, &ROW_LINK, "href"));
        record.category_id = Some(category_id_from_url(&href));
        return;
    }
    if class.contains("release") {
        record.date_updated = Some(text_or_not_found(first_text(row, &ROW_DATE)));
        record.date_published = Some(text_or_not_found(first_attr(row, &ROW_DATE, "content")));
        return;
    }
    if class.contains("language") {
        record.languages = Some(text_or_not_found(own_text(row)));
        return;
    }

    if let Some(version) = first_text(row, &ROW_VERSION) {
        record.version = Some(version);
        return;
    }

    let label = first_text(row, &ROW_SPAN).unwrap_or_default().to_lowercase();
    if label.contains("size") {
        record.size = Some(text_or_not_found(own_text(row)));
        return;
    }
    if label.contains("watch") {
        record.for_watch = Some(true);
        return;
    }

    if let Some(seller) = first_text(row, &ROW_AUTHOR) {
        record.seller = Some(seller);
    }
}

fn fill_content_rating(root: ElementRef<'_>, record: &mut AppRecord) {
    let rating = first_text(root, &CONTENT_RATING).or_else(|| first_text(root, &CONTENT_RATING_FALLBACK));
    record.content_rating = Some(text_or_not_found(rating));

    let reasons: String = root
        .select(&CONTENT_RATING_REASONS)
        .filter_map(own_text)
        .collect();
    record.content_rating_reasons = Some(reasons);
}

fn fill_ratings(root: ElementRef<'_>, record: &mut AppRecord) {
    let value = first_text(root, &RATING_VALUE_CV).map_or(0.0, |t| rating_value_from_text(&t));
    record.rating_value_cv = Some(value);
    record.star_rating_cv = Some(value);
    record.review_count_cv =
        Some(first_text(root, &RATING_COUNT_CV).map_or(0, |t| rating_count_from_text(&t)));

    record.rating_cv = Some(text_or_not_found(first_attr(root, &RATING_CV, "aria-label")));
    let rating_av = text_or_not_found(first_attr(root, &RATING_AV, "aria-label"));
    record.review_count_av = review_count_from_label(&rating_av);
    record.rating_av = Some(rating_av);
}

fn fill_in_app(root: ElementRef<'_>, record: &mut AppRecord) {
    record.has_inapp = Some(root.select(&INAPP_HEADING).next().is_some());
    let items = root.select(&INAPP_ITEMS).map(|item| {
        item.select(&ROW_SPAN)
            .filter_map(element_text)
            .collect::<Vec<_>>()
    });
    record.inapp_info = Some(join_delimited(items, INAPP_ITEM_SEP, INAPP_FIELD_SEP));
}

/// Direct text nodes of every matching paragraph, space-joined. Empty when
/// none match.
fn joined_paragraphs(root: ElementRef<'_>, selector: &Selector) -> String {
    root.select(selector)
        .flat_map(own_text_nodes)
        .collect::<Vec<_>>()
        .join(" ")
}
