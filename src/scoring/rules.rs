//! The fixed rule table
//!
//! Declaration order matters: it is the evaluation order and the tie-break
//! order for suggestions of equal priority.

use crate::models::{Priority, SignalSet};
use serde::Serialize;

/// Suggestion emitted when a rule fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuggestionTemplate {
    pub priority: Priority,
    #[serde(rename = "type")]
    pub category: &'static str,
    pub message: &'static str,
    pub detail: &'static str,
}

/// A named, weighted, pure predicate over a signal set
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rule {
    pub name: &'static str,
    pub weight: u32,
    #[serde(skip)]
    pub check: fn(&SignalSet) -> bool,
    pub suggestion: Option<SuggestionTemplate>,
}

/// Inclusive character-length bounds for the title
pub const TITLE_LENGTH: (usize, usize) = (20, 70);

/// Inclusive character-length bounds for the meta description
pub const DESCRIPTION_LENGTH: (usize, usize) = (80, 160);

/// Minimum body word count for the page to count as having content
pub const MIN_WORD_COUNT: usize = 100;

pub static RULES: &[Rule] = &[
    Rule {
        name: "hasTitle",
        weight: 10,
        check: has_title,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::High,
            category: "meta",
            message: "Missing page title",
            detail: "Add a <title> element so AI agents can tell what the page is about.",
        }),
    },
    Rule {
        name: "titleLength",
        weight: 5,
        check: title_length,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Medium,
            category: "meta",
            message: "Title length is not ideal",
            detail: "Keep the title between 20 and 70 characters; the current title is missing, too short, or too long.",
        }),
    },
    Rule {
        name: "hasDescription",
        weight: 15,
        check: has_description,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::High,
            category: "meta",
            message: "Missing meta description",
            detail: "A meta description is one of the main cues AI agents use to understand what a page contains.",
        }),
    },
    Rule {
        name: "descriptionLength",
        weight: 5,
        check: description_length,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Medium,
            category: "meta",
            message: "Meta description length is not ideal",
            detail: "Keep the meta description between 80 and 160 characters.",
        }),
    },
    Rule {
        name: "hasH1",
        weight: 10,
        check: has_h1,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::High,
            category: "structure",
            message: "Missing H1 heading",
            detail: "Every page should have an H1 heading that states its topic.",
        }),
    },
    Rule {
        name: "singleH1",
        weight: 5,
        check: single_h1,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Medium,
            category: "structure",
            message: "Incorrect number of H1 headings",
            detail: "Use exactly one H1 heading per page; this page has none or several.",
        }),
    },
    Rule {
        name: "hasJsonLd",
        weight: 15,
        check: has_json_ld,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::High,
            category: "structured-data",
            message: "Missing structured data (JSON-LD)",
            detail: "Add JSON-LD structured data so AI agents can recognize what kind of content the page holds.",
        }),
    },
    Rule {
        name: "hasOgTitle",
        weight: 5,
        check: has_og_title,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Low,
            category: "social",
            message: "Missing Open Graph title",
            detail: "Add an og:title tag to improve social previews and AI understanding.",
        }),
    },
    Rule {
        name: "hasOgDescription",
        weight: 5,
        check: has_og_description,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Low,
            category: "social",
            message: "Missing Open Graph description",
            detail: "Add an og:description tag.",
        }),
    },
    Rule {
        name: "hasOgImage",
        weight: 5,
        check: has_og_image,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Low,
            category: "social",
            message: "Missing Open Graph image",
            detail: "Add an og:image tag to give the page a preview image.",
        }),
    },
    Rule {
        name: "hasContent",
        weight: 10,
        check: has_content,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Medium,
            category: "content",
            message: "Too little page content",
            detail: "Aim for at least 100 words of content so AI agents can work out what the page is about.",
        }),
    },
    Rule {
        name: "imagesHaveAlt",
        weight: 5,
        check: images_have_alt,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Medium,
            category: "accessibility",
            message: "Some images are missing alt text",
            detail: "Describe every image with an alt attribute so AI agents can understand it.",
        }),
    },
    Rule {
        name: "hasCanonical",
        weight: 5,
        check: has_canonical,
        suggestion: Some(SuggestionTemplate {
            priority: Priority::Low,
            category: "seo",
            message: "Missing canonical tag",
            detail: "Add a canonical link to avoid duplicate-content issues.",
        }),
    },
];

/// Sum of all declared weights (the raw total when every rule passes)
pub fn total_weight() -> u32 {
    RULES.iter().map(|rule| rule.weight).sum()
}

fn char_len_within(value: Option<&str>, (min, max): (usize, usize)) -> bool {
    let len = value.map_or(0, |v| v.chars().count());
    (min..=max).contains(&len)
}

fn has_title(s: &SignalSet) -> bool {
    s.meta.title.is_some()
}

fn title_length(s: &SignalSet) -> bool {
    char_len_within(s.meta.title.as_deref(), TITLE_LENGTH)
}

fn has_description(s: &SignalSet) -> bool {
    s.meta.description.is_some()
}

fn description_length(s: &SignalSet) -> bool {
    char_len_within(s.meta.description.as_deref(), DESCRIPTION_LENGTH)
}

fn has_h1(s: &SignalSet) -> bool {
    !s.structure.h1.is_empty()
}

fn single_h1(s: &SignalSet) -> bool {
    s.structure.h1.len() == 1
}

fn has_json_ld(s: &SignalSet) -> bool {
    s.structure.has_json_ld
}

fn has_og_title(s: &SignalSet) -> bool {
    s.meta.og_title.is_some()
}

fn has_og_description(s: &SignalSet) -> bool {
    s.meta.og_description.is_some()
}

fn has_og_image(s: &SignalSet) -> bool {
    s.meta.og_image.is_some()
}

fn has_content(s: &SignalSet) -> bool {
    s.content.word_count >= MIN_WORD_COUNT
}

/// Vacuously true when the page has no images
fn images_have_alt(s: &SignalSet) -> bool {
    s.content.images.iter().all(|image| !image.alt.is_empty())
}

fn has_canonical(s: &SignalSet) -> bool {
    s.meta.canonical.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageRef;
    use std::collections::HashSet;

    #[test]
    fn test_rule_names_unique_and_weights_positive() {
        let names: HashSet<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), RULES.len());
        assert!(RULES.iter().all(|r| r.weight > 0));
    }

    #[test]
    fn test_declaration_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "hasTitle",
                "titleLength",
                "hasDescription",
                "descriptionLength",
                "hasH1",
                "singleH1",
                "hasJsonLd",
                "hasOgTitle",
                "hasOgDescription",
                "hasOgImage",
                "hasContent",
                "imagesHaveAlt",
                "hasCanonical",
            ]
        );
    }

    #[test]
    fn test_total_weight() {
        assert_eq!(total_weight(), 100);
        let json_ld = RULES.iter().find(|r| r.name == "hasJsonLd").unwrap();
        assert_eq!(json_ld.weight, 15);
    }

    #[test]
    fn test_title_length_bounds() {
        let mut s = SignalSet::default();
        assert!(!title_length(&s));
        s.meta.title = Some("x".repeat(19));
        assert!(!title_length(&s));
        s.meta.title = Some("x".repeat(20));
        assert!(title_length(&s));
        s.meta.title = Some("x".repeat(70));
        assert!(title_length(&s));
        s.meta.title = Some("x".repeat(71));
        assert!(!title_length(&s));
        // Characters, not bytes
        s.meta.title = Some("ü".repeat(40));
        assert!(title_length(&s));
    }

    #[test]
    fn test_description_length_bounds() {
        let mut s = SignalSet::default();
        s.meta.description = Some("d".repeat(79));
        assert!(!description_length(&s));
        s.meta.description = Some("d".repeat(80));
        assert!(description_length(&s));
        s.meta.description = Some("d".repeat(160));
        assert!(description_length(&s));
        s.meta.description = Some("d".repeat(161));
        assert!(!description_length(&s));
    }

    #[test]
    fn test_h1_rules() {
        let mut s = SignalSet::default();
        assert!(!has_h1(&s) && !single_h1(&s));
        s.structure.h1 = vec!["a".into()];
        assert!(has_h1(&s) && single_h1(&s));
        s.structure.h1.push("b".into());
        assert!(has_h1(&s) && !single_h1(&s));
    }

    #[test]
    fn test_images_have_alt() {
        let mut s = SignalSet::default();
        assert!(images_have_alt(&s));
        s.content.images = vec![
            ImageRef { src: "a".into(), alt: "A".into() },
            ImageRef { src: "b".into(), alt: String::new() },
        ];
        assert!(!images_have_alt(&s));
        s.content.images[1].alt = "B".into();
        assert!(images_have_alt(&s));
    }

    #[test]
    fn test_content_threshold() {
        let mut s = SignalSet::default();
        s.content.word_count = 99;
        assert!(!has_content(&s));
        s.content.word_count = 100;
        assert!(has_content(&s));
    }

    #[test]
    fn test_every_rule_has_suggestion() {
        assert!(RULES.iter().all(|r| r.suggestion.is_some()));
    }
}
