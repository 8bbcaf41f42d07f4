//! Structural markers: headings, JSON-LD types, microdata presence

use super::non_blank;
use crate::models::PageStructure;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Maximum headings kept per level
pub const MAX_HEADINGS: usize = 100;

/// Maximum JSON-LD type names kept across all blocks
pub const MAX_JSON_LD_TYPES: usize = 50;

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("Failed to parse h1 selector - this is a bug"));

static H2_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("Failed to parse h2 selector - this is a bug"));

static H3_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("Failed to parse h3 selector - this is a bug"));

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("Failed to parse JSON-LD selector - this is a bug")
});

static ITEMSCOPE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[itemscope]").expect("Failed to parse itemscope selector - this is a bug")
});

pub(super) fn extract_structure(document: &Html) -> PageStructure {
    let json_ld_types = extract_json_ld_types(document);
    PageStructure {
        h1: heading_texts(document, &H1_SELECTOR),
        h2: heading_texts(document, &H2_SELECTOR),
        h3: heading_texts(document, &H3_SELECTOR),
        has_json_ld: !json_ld_types.is_empty(),
        json_ld_types,
        has_microdata: document.select(&ITEMSCOPE_SELECTOR).next().is_some(),
    }
}

/// Trimmed heading texts in document order, skipping empty headings
fn heading_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .filter_map(|element| non_blank(&element.text().collect::<String>()))
        .take(MAX_HEADINGS)
        .collect()
}

/// `@type` names from every JSON-LD block, in order, duplicates kept.
///
/// A block that is not valid JSON is skipped and never aborts extraction.
fn extract_json_ld_types(document: &Html) -> Vec<String> {
    let mut types = Vec::new();

    for (index, script) in document.select(&JSON_LD_SELECTOR).enumerate() {
        let text: String = script.text().collect();
        match serde_json::from_str::<Value>(&text) {
            Ok(json) => push_types(&json, &mut types),
            Err(e) => debug!("Skipping malformed JSON-LD block #{}: {}", index, e),
        }
        if types.len() >= MAX_JSON_LD_TYPES {
            types.truncate(MAX_JSON_LD_TYPES);
            break;
        }
    }

    types
}

/// Append the block's `@type`: a string, or each string of an array.
/// Anything else (and an empty string) contributes nothing.
fn push_types(json: &Value, types: &mut Vec<String>) {
    let Some(value) = json.get("@type") else {
        return;
    };
    match value {
        Value::String(name) if !name.is_empty() => types.push(name.clone()),
        Value::Array(names) => types.extend(
            names
                .iter()
                .filter_map(Value::as_str)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        ),
        _ => {}
    }
}
