//! Page metadata: title, description, Open Graph tags, canonical link

use super::non_blank;
use crate::models::PageMeta;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});

static DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#)
        .expect("Failed to parse meta description selector - this is a bug")
});

static OG_TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#)
        .expect("Failed to parse og:title selector - this is a bug")
});

static OG_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:description"]"#)
        .expect("Failed to parse og:description selector - this is a bug")
});

static OG_IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:image"]"#)
        .expect("Failed to parse og:image selector - this is a bug")
});

static CANONICAL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel="canonical"]"#)
        .expect("Failed to parse canonical selector - this is a bug")
});

pub(super) fn extract_meta(document: &Html) -> PageMeta {
    PageMeta {
        title: extract_title(document),
        description: first_attr(document, &DESCRIPTION_SELECTOR, "content"),
        og_title: first_attr(document, &OG_TITLE_SELECTOR, "content"),
        og_description: first_attr(document, &OG_DESCRIPTION_SELECTOR, "content"),
        og_image: first_attr(document, &OG_IMAGE_SELECTOR, "content"),
        canonical: first_attr(document, &CANONICAL_SELECTOR, "href"),
    }
}

/// Text of the first `<title>` element in document order.
///
/// Later `<title>` elements (inline SVG titles, mostly) are ignored.
fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .and_then(|element| non_blank(&element.text().collect::<String>()))
}

/// Attribute of the first element matching `selector`.
///
/// Only the first match is consulted: if it lacks the attribute, the value is
/// absent even when a later match carries one.
fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .and_then(non_blank)
}
