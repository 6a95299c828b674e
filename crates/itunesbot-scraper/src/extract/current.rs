use std::collections::BTreeMap;
use std::sync::LazyLock;

use itunesbot_core::{AppRecord, NOT_FOUND};
use scraper::{ElementRef, Html, Selector};

use super::dom::{css, element_text, first_attr, first_text, own_text};
use super::{Layout, LayoutStrategy};
use crate::normalize::{
    category_id_from_url, collapse_whitespace, join_delimited, paid_from_pricing_text,
    rating_count_from_text, rating_value_from_text, review_count_from_label, standardize_label,
    text_or_not_found, INAPP_FIELD_SEP, INAPP_ITEM_SEP,
};

static NAME: LazyLock<Selector> = LazyLock::new(|| css("h1.product-header__title"));
static IDENTITY_LINK: LazyLock<Selector> = LazyLock::new(|| css(".product-header__identity a"));

static INFO_ITEMS: LazyLock<Selector> = LazyLock::new(|| css(".information-list__item"));
static INFO_TERM: LazyLock<Selector> = LazyLock::new(|| css("dt"));
static INFO_DEFINITION: LazyLock<Selector> = LazyLock::new(|| css("dd"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| css("a"));
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| css("li"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| css("span"));
static RELATED_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    css("div.l-column.small-hide.medium-show.medium-9.medium-offset-3.large-10.large-offset-2 a[href]")
});

static RATING_AVERAGES: LazyLock<Selector> =
    LazyLock::new(|| css(".we-customer-ratings__averages"));
static RATING_COUNT: LazyLock<Selector> = LazyLock::new(|| css(".we-customer-ratings__count"));

static SUPPORTS: LazyLock<Selector> = LazyLock::new(|| css(".supports-list__item__copy h3"));
static VERSION_REMARKS: LazyLock<Selector> = LazyLock::new(|| css(".section__description p"));
static LATEST_VERSION: LazyLock<Selector> =
    LazyLock::new(|| css(".whats-new__latest__version"));

static SECTIONS: LazyLock<Selector> =
    LazyLock::new(|| css("section.l-content-width.section.section--bordered"));
static SECTION_HEADLINE: LazyLock<Selector> = LazyLock::new(|| css("h2.section__headline"));
static LOCKUP_LINK: LazyLock<Selector> = LazyLock::new(|| css("a.targeted-link"));
static LOCKUP_NAME: LazyLock<Selector> = LazyLock::new(|| css(".targeted-link__target"));

/// Card/section detail page built from `product-header`, an
/// `information-list` of term/definition pairs and titled shelves.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentLayout;

impl LayoutStrategy for CurrentLayout {
    fn layout(&self) -> Layout {
        Layout::Current
    }

    fn extract(&self, document: &Html, record: &mut AppRecord) {
        let root = document.root_element();

        let name = root
            .select(&NAME)
            .next()
            .and_then(|h1| own_text(h1).or_else(|| element_text(h1)));
        record.name = Some(text_or_not_found(name));
        record.publisher = Some(text_or_not_found(first_text(root, &IDENTITY_LINK)));
        record.publisher_store_site =
            Some(text_or_not_found(first_attr(root, &IDENTITY_LINK, "href")));

        record.has_inapp = Some(false);
        for item in root.select(&INFO_ITEMS) {
            apply_information_item(item, record);
        }
        for link in root.select(&RELATED_LINKS) {
            let (Some(label), Some(href)) = (element_text(link), link.value().attr("href")) else {
                continue;
            };
            let href = collapse_whitespace(href);
            let field = Field::from_label(&label);
            if field == Some(Field::Category) {
                record.category_id = Some(category_id_from_url(&href));
            }
            assign(record, field, &label, href);
        }

        fill_ratings(root, record);
        fill_supports(root, record);

        record.version_remarks = Some(text_or_not_found(first_text(root, &VERSION_REMARKS)));
        record.version = Some(text_or_not_found(first_text(root, &LATEST_VERSION).map(|v| {
            v.strip_prefix("Version ")
                .map_or_else(|| v.clone(), |rest| rest.trim().to_owned())
        })));

        for section in root.select(&SECTIONS) {
            let Some(headline) = first_text(section, &SECTION_HEADLINE) else {
                continue;
            };
            match headline.as_str() {
                "More By This Developer" => {
                    record.more_by_developer.extend(lockup_links(section));
                }
                "You May Also Like" => record.similar_apps.extend(lockup_links(section)),
                _ => {}
            }
        }
    }
}

/// Metadata labels with a dedicated record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Seller,
    Size,
    Category,
    Price,
    AppSupport,
    DeveloperWebsite,
    PrivacyPolicy,
    Copyright,
    AgeRating,
    InAppPurchases,
    Languages,
    Compatibility,
    DesignedFor,
}

impl Field {
    fn from_label(label: &str) -> Option<Self> {
        let field = match label {
            "Seller" => Self::Seller,
            "Size" => Self::Size,
            "Category" => Self::Category,
            "Price" => Self::Price,
            "App Support" => Self::AppSupport,
            "Developer Website" => Self::DeveloperWebsite,
            "Privacy Policy" => Self::PrivacyPolicy,
            "Copyright" => Self::Copyright,
            "Age Rating" => Self::AgeRating,
            "In-App Purchases" => Self::InAppPurchases,
            "Languages" => Self::Languages,
            "Compatibility" => Self::Compatibility,
            "Designed For" => Self::DesignedFor,
            _ => return None,
        };
        Some(field)
    }
}

/// Stores `value` in the field named by `label`, or in `extras` under the
/// standardized label when the table has no entry for it.
fn assign(record: &mut AppRecord, field: Option<Field>, label: &str, value: String) {
    let Some(field) = field else {
        let key = standardize_label(label);
        if !key.is_empty() {
            record.extras.insert(key, value);
        }
        return;
    };
    match field {
        Field::Seller => record.seller = Some(value),
        Field::Size => record.size = Some(value),
        Field::Category => record.category_name = Some(value),
        Field::Price => {
            record.is_paid = Some(paid_from_pricing_text(&value));
            record.pricing = Some(value);
        }
        Field::AppSupport => record.support_site = Some(value),
        Field::DeveloperWebsite => record.publisher_home_site = Some(value),
        Field::PrivacyPolicy => record.privacy_policy = Some(value),
        Field::Copyright => record.copyright = Some(value),
        Field::AgeRating => record.content_rating = Some(value),
        Field::InAppPurchases => {
            record.has_inapp = Some(true);
            record.inapp_info = Some(value);
        }
        Field::Languages => record.languages = Some(value),
        Field::Compatibility => record.compatibility = Some(value),
        Field::DesignedFor => record.designed_for = Some(value),
    }
}

fn apply_information_item(item: ElementRef<'_>, record: &mut AppRecord) {
    let (Some(term), Some(definition)) = (
        item.select(&INFO_TERM).next(),
        item.select(&INFO_DEFINITION).next(),
    ) else {
        return;
    };
    let Some(label) = element_text(term) else {
        return;
    };
    let field = Field::from_label(&label);

    let value = match field {
        Some(Field::InAppPurchases) if definition.select(&LIST_ITEM).next().is_some() => {
            let entries = definition.select(&LIST_ITEM).map(|li| {
                li.select(&SPAN).filter_map(element_text).collect::<Vec<_>>()
            });
            join_delimited(entries, INAPP_ITEM_SEP, INAPP_FIELD_SEP)
        }
        _ => element_text(definition).unwrap_or_default(),
    };

    if field == Some(Field::Category) {
        if let Some(href) = first_attr(definition, &ANCHOR, "href") {
            record.category_id = Some(category_id_from_url(&href));
        }
    }
    assign(record, field, &label, value);
}

fn fill_ratings(root: ElementRef<'_>, record: &mut AppRecord) {
    let averages = first_text(root, &RATING_AVERAGES);
    let count = first_text(root, &RATING_COUNT);

    let value = averages.as_deref().map_or(0.0, rating_value_from_text);
    record.rating_value_cv = Some(value);
    record.star_rating_cv = Some(value);
    record.review_count_cv = Some(count.as_deref().map_or(0, rating_count_from_text));
    record.rating_cv = Some(NOT_FOUND.to_owned());

    let parts: Vec<String> = averages.into_iter().chain(count).collect();
    let rating_av = if parts.is_empty() {
        NOT_FOUND.to_owned()
    } else {
        parts.join(", ")
    };
    record.review_count_av = review_count_from_label(&rating_av);
    record.rating_av = Some(rating_av);
}

fn fill_supports(root: ElementRef<'_>, record: &mut AppRecord) {
    let devices: Vec<String> = root.select(&SUPPORTS).filter_map(element_text).collect();
    if devices
        .iter()
        .any(|device| device.to_lowercase().contains("watch"))
    {
        record.for_watch = Some(true);
    }
    record.supported_devices = Some(devices);
}

/// App name → link for every lockup tile in a shelf section.
fn lockup_links(section: ElementRef<'_>) -> BTreeMap<String, String> {
    section
        .select(&LOCKUP_LINK)
        .filter_map(|link| {
            let href = collapse_whitespace(link.value().attr("href")?);
            let name = first_text(link, &LOCKUP_NAME)?;
            (!href.is_empty()).then_some((name, href))
        })
        .collect()
}
