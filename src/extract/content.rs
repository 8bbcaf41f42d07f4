//! Content statistics: body text, word count, images, links
//!
//! Boilerplate subtrees (script, style, nav, header, footer, aside) are left
//! out of everything collected here, including images and links.

use super::{content_text, is_text_space, walk_content, Visit};
use crate::models::{ImageRef, LinkRef, PageContent};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Maximum characters of normalized body text returned for display
pub const MAX_TEXT_CHARS: usize = 2000;

/// Maximum images kept, in document order
pub const MAX_IMAGES: usize = 20;

/// Maximum links kept, in document order
pub const MAX_LINKS: usize = 30;

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body").expect("Failed to parse body selector - this is a bug")
});

pub(super) fn extract_content(document: &Html) -> PageContent {
    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return PageContent::default();
    };

    let mut text = TextNormalizer::new(MAX_TEXT_CHARS);
    let mut images = Vec::new();
    let mut links = Vec::new();

    walk_content(body, |visit| match visit {
        Visit::Text(chunk) => text.push_str(chunk),
        Visit::Element(element) => match element.value().name() {
            "img" if images.len() < MAX_IMAGES => images.extend(image_ref(element)),
            "a" if links.len() < MAX_LINKS => links.extend(link_ref(element)),
            _ => {}
        },
    });

    let (text, word_count) = text.finish();
    PageContent {
        text,
        word_count,
        images,
        links,
    }
}

fn image_ref(element: ElementRef<'_>) -> Option<ImageRef> {
    let src = element.value().attr("src").filter(|src| !src.is_empty())?;
    Some(ImageRef {
        src: src.to_string(),
        alt: element.value().attr("alt").unwrap_or_default().to_string(),
    })
}

fn link_ref(element: ElementRef<'_>) -> Option<LinkRef> {
    let href = element.value().attr("href").filter(|href| is_followable(href))?;
    Some(LinkRef {
        href: href.to_string(),
        text: content_text(element).trim_matches(is_text_space).to_string(),
    })
}

/// Fragment-only and `javascript:` hrefs are not links to content
fn is_followable(href: &str) -> bool {
    const SCRIPT_SCHEME: &str = "javascript:";
    let is_script = href
        .get(..SCRIPT_SCHEME.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SCRIPT_SCHEME));
    !href.is_empty() && !href.starts_with('#') && !is_script
}

/// Single-pass whitespace normalizer.
///
/// Produces the same result as collapsing every whitespace run to one space,
/// trimming, then truncating to `max_chars`, but only ever buffers the
/// truncated excerpt. Words are counted over the whole stream.
struct TextNormalizer {
    excerpt: String,
    excerpt_chars: usize,
    max_chars: usize,
    word_count: usize,
    in_word: bool,
    pending_space: bool,
}

impl TextNormalizer {
    fn new(max_chars: usize) -> Self {
        Self {
            excerpt: String::new(),
            excerpt_chars: 0,
            max_chars,
            word_count: 0,
            in_word: false,
            pending_space: false,
        }
    }

    fn push_str(&mut self, chunk: &str) {
        for c in chunk.chars() {
            if is_text_space(c) {
                // Leading whitespace is dropped, interior runs become one space
                self.pending_space = self.word_count > 0;
                self.in_word = false;
                continue;
            }
            if !self.in_word {
                self.word_count += 1;
                self.in_word = true;
            }
            if self.pending_space {
                self.push_char(' ');
                self.pending_space = false;
            }
            self.push_char(c);
        }
    }

    fn push_char(&mut self, c: char) {
        if self.excerpt_chars < self.max_chars {
            self.excerpt.push(c);
            self.excerpt_chars += 1;
        }
    }

    /// Returns `(excerpt, word_count)`; trailing whitespace never reaches the excerpt
    fn finish(self) -> (String, usize) {
        (self.excerpt, self.word_count)
    }
}
