//! Text cleanup and composite-field parsing shared by both page layouts.
//!
//! Everything here is pure string work; DOM access lives in
//! [`crate::extract`].

use itunesbot_core::NOT_FOUND;

/// Value stored in `category_id` when the genre link cannot be parsed.
pub const CATEGORY_ID_FALLBACK: &str = "na";

/// Separator terminating each in-app purchase entry.
pub const INAPP_ITEM_SEP: &str = "||";
/// Separator between the spans (name, price) of one in-app purchase entry.
pub const INAPP_FIELD_SEP: &str = " ";
/// Separator terminating each "customers also bought" link.
pub const ALSO_BOUGHT_SEP: &str = "||";
/// Separator terminating each customer review entry.
pub const REVIEW_ITEM_SEP: &str = "|";
/// Separator between a review's author label and its text.
pub const REVIEW_FIELD_SEP: &str = ":";

/// Collapses every run of whitespace to a single space and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes newlines and tabs without touching other whitespace.
#[must_use]
pub fn remove_line_breaks(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Unwraps a scraped value, substituting the `"Not Found"` sentinel.
#[must_use]
pub fn text_or_not_found(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_FOUND.to_owned())
}

/// An app is paid unless its pricing text mentions `Free` (case-sensitive).
#[must_use]
pub fn paid_from_pricing_text(text: &str) -> bool {
    !text.contains("Free")
}

/// Extracts the genre id from a genre URL such as
/// `https://itunes.apple.com/us/genre/ios-shopping/id6024?mt=8` → `"6024"`.
///
/// Relative hrefs (`/us/genre/ios-shopping/id6024`) are read the same way.
/// Returns [`CATEGORY_ID_FALLBACK`] when the path has fewer than four
/// segments or the segment is empty.
#[must_use]
pub fn category_id_from_url(url: &str) -> String {
    let path = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_owned(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned(),
    };
    path.split('/')
        .nth(4)
        .map(strip_id_prefix)
        .filter(|id| !id.is_empty())
        .map_or_else(|| CATEGORY_ID_FALLBACK.to_owned(), str::to_owned)
}

/// Splits a detail-page URL into its region code and numeric app id.
///
/// `https://itunes.apple.com/us/app/some-app/id123` → `(Some("us"), Some("123"))`.
/// Either half is `None` when the path is too short or the URL is malformed.
#[must_use]
pub fn geo_and_app_id(url: &str) -> (Option<String>, Option<String>) {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return (None, None);
    };
    let segments: Vec<&str> = parsed.path().split('/').collect();
    let geo = segments
        .get(1)
        .filter(|s| !s.is_empty())
        .map(|s| (*s).to_owned());
    let app_id = segments
        .get(4)
        .map(|s| strip_id_prefix(s))
        .filter(|s| !s.is_empty())
        .map(str::to_owned);
    (geo, app_id)
}

/// Pulls the all-versions review count out of a ratings label such as
/// `"4.5 stars, 1,234 Ratings"` → `"1,234"`.
///
/// Only attempted when the label contains `Ratings` and a comma; otherwise
/// the count stays unset rather than becoming zero.
#[must_use]
pub fn review_count_from_label(label: &str) -> Option<String> {
    if !label.contains("Ratings") {
        return None;
    }
    let (_, rest) = label.split_once(',')?;
    let count = rest.replace("Ratings", "");
    let count = count.trim();
    (!count.is_empty()).then(|| count.to_owned())
}

/// Parses a current-version rating count such as `"1,234 Ratings"` → `1234`.
///
/// Returns `0` when nothing numeric remains.
#[must_use]
pub fn rating_count_from_text(text: &str) -> u64 {
    let digits: String = text
        .replace("Ratings", "")
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parses the leading number of a rating text such as `"4.5"` or
/// `"4.7 out of 5"`. Returns `0.0` when there is none.
#[must_use]
pub fn rating_value_from_text(text: &str) -> f64 {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Builds a delimited blob: the fields of each entry are joined with
/// `field_sep`, and every entry (the last included) is terminated with
/// `item_sep`.
///
/// ```
/// use itunesbot_scraper::normalize::join_delimited;
///
/// let blob = join_delimited([["alice", "great"], ["bob", "meh"]], "|", ":");
/// assert_eq!(blob, "alice:great|bob:meh|");
/// ```
pub fn join_delimited<I, E, S>(entries: I, item_sep: &str, field_sep: &str) -> String
where
    I: IntoIterator<Item = E>,
    E: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for entry in entries {
        for (idx, field) in entry.into_iter().enumerate() {
            if idx > 0 {
                out.push_str(field_sep);
            }
            out.push_str(field.as_ref());
        }
        out.push_str(item_sep);
    }
    out
}

/// Turns a metadata label into an `extras` key: whitespace collapsed,
/// lowercased, spaces replaced by underscores.
#[must_use]
pub fn standardize_label(label: &str) -> String {
    collapse_whitespace(label).replace(' ', "_").to_lowercase()
}

fn strip_id_prefix(segment: &str) -> &str {
    segment.strip_prefix("id").unwrap_or(segment)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
