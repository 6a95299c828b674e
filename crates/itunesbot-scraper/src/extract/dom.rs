//! Small lookups over a parsed page shared by both layout strategies.
//!
//! Every helper returns `None` instead of an empty string so callers can
//! chain fallbacks and sentinels uniformly.

use scraper::{ElementRef, Html, Selector};

use crate::normalize::collapse_whitespace;

/// Parses a selector literal. Only used for the fixed selectors of this crate.
pub(crate) fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid CSS selector")
}

/// Collapsed text of the first element matching `selector` under `scope`.
pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().and_then(element_text)
}

/// Trimmed value of `attr` on the first element matching `selector`.
pub(crate) fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// All descendant text of `el`, whitespace-collapsed.
pub(crate) fn element_text(el: ElementRef<'_>) -> Option<String> {
    let text = collapse_whitespace(&el.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

/// Text nodes that are direct children of `el`, whitespace-collapsed.
pub(crate) fn own_text(el: ElementRef<'_>) -> Option<String> {
    let raw: String = el
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.text.to_string())
        .collect();
    let text = collapse_whitespace(&raw);
    (!text.is_empty()).then_some(text)
}

/// Each non-blank direct text node of `el`, collapsed separately.
pub(crate) fn own_text_nodes(el: ElementRef<'_>) -> Vec<String> {
    el.children()
        .filter_map(|node| node.value().as_text())
        .map(|text| collapse_whitespace(&text.text))
        .filter(|text| !text.is_empty())
        .collect()
}

/// First direct child element of `el` with tag `name`.
pub(crate) fn child_element<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == name)
}

/// Whether anything in the document matches `selector`.
pub(crate) fn exists(document: &Html, selector: &Selector) -> bool {
    document.select(selector).next().is_some()
}
