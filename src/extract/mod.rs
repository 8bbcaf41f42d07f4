//! Signal extraction
//!
//! Turns raw page markup into an immutable [`SignalSet`]. Extraction is
//! best-effort: the input is uncontrolled third-party markup, so nothing in
//! here returns an error. Malformed markup degrades to absent or empty
//! fields, and every extracted sequence is bounded.
//!
//! ```text
//! markup ──► Html::parse_document ──┬─► meta       (title, description, og:*, canonical)
//!                                   ├─► structure  (h1-h3, JSON-LD @type, itemscope)
//!                                   └─► content    (body text, word count, images, links)
//! ```

mod content;
mod meta;
mod structure;

use crate::models::SignalSet;
use scraper::{ElementRef, Html, Node};
use tracing::debug;

pub use content::{MAX_IMAGES, MAX_LINKS, MAX_TEXT_CHARS};
pub use structure::{MAX_HEADINGS, MAX_JSON_LD_TYPES};

/// Elements whose subtrees are boilerplate, not page content
const BOILERPLATE_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

/// Extract the signal set for a page.
///
/// `source_url` is the absolute URL the markup was retrieved from. It is
/// only used to tag log output; hrefs and srcs are reported as written.
pub fn extract(markup: &str, source_url: &str) -> SignalSet {
    let document = Html::parse_document(markup);
    if !document.errors.is_empty() {
        debug!(
            "{}: {} markup parse irregularities (ignored)",
            source_url,
            document.errors.len()
        );
    }

    let meta = meta::extract_meta(&document);
    let structure = structure::extract_structure(&document);
    let content = content::extract_content(&document);

    debug!(
        "{}: h1={} h2={} h3={} json_ld_types={} words={} images={} links={}",
        source_url,
        structure.h1.len(),
        structure.h2.len(),
        structure.h3.len(),
        structure.json_ld_types.len(),
        content.word_count,
        content.images.len(),
        content.links.len()
    );

    SignalSet {
        meta,
        structure,
        content,
    }
}

/// One step of a pruned document walk
enum Visit<'a> {
    Text(&'a str),
    Element(ElementRef<'a>),
}

/// Walk `root` and its descendants in document order, skipping boilerplate
/// subtrees entirely.
///
/// Uses an explicit stack so pathologically deep markup cannot overflow the
/// call stack.
fn walk_content<'a>(root: ElementRef<'a>, mut visit: impl FnMut(Visit<'a>)) {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => visit(Visit::Text(&**text)),
            Node::Element(element) => {
                if BOILERPLATE_ELEMENTS.contains(&element.name()) {
                    continue;
                }
                if let Some(element_ref) = ElementRef::wrap(node) {
                    visit(Visit::Element(element_ref));
                }
                stack.extend(node.children().rev());
            }
            _ => {}
        }
    }
}

/// Text of an element with boilerplate subtrees left out
fn content_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    walk_content(element, |visit| {
        if let Visit::Text(text) = visit {
            out.push_str(text);
        }
    });
    out
}

/// Whitespace as browsers' script engines see it: Unicode `White_Space`
/// plus U+FEFF (BOM / zero-width no-break space)
fn is_text_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Trim a value, mapping blank to `None`
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim_matches(is_text_space);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
