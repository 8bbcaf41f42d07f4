//! Rule-based AI readability scoring
//!
//! This module scores a [`SignalSet`](crate::models::SignalSet) against a
//! fixed, ordered table of weighted rules and turns the failed rules into
//! prioritized suggestions. It knows nothing about markup.
//!
//! # Scoring Formula
//!
//! ```text
//! Score = clamp(Σ weight of passing rules, 0, 100)
//! ```
//!
//! # Rule Table
//!
//! | Rule              | Weight | Passes when                          |
//! |-------------------|--------|--------------------------------------|
//! | hasTitle          | 10     | title present                        |
//! | titleLength       | 5      | title is 20-70 characters            |
//! | hasDescription    | 15     | meta description present             |
//! | descriptionLength | 5      | description is 80-160 characters     |
//! | hasH1             | 10     | at least one h1                      |
//! | singleH1          | 5      | exactly one h1                       |
//! | hasJsonLd         | 15     | a JSON-LD block declares an `@type`  |
//! | hasOgTitle        | 5      | og:title present                     |
//! | hasOgDescription  | 5      | og:description present               |
//! | hasOgImage        | 5      | og:image present                     |
//! | hasContent        | 10     | body has at least 100 words          |
//! | imagesHaveAlt     | 5      | every image has alt text (or none)   |
//! | hasCanonical      | 5      | canonical link present               |
//!
//! # Example
//!
//! A page with a good title and description, one h1 and nothing else:
//! 10 + 5 + 15 + 5 + 10 + 5 + 5 (no images, so alt text passes) = 55.

mod engine;
mod rules;
mod suggestions;

pub use engine::{evaluate, Evaluation, RuleEngine, RuleOutcome, MAX_SCORE};
pub use rules::{
    total_weight, Rule, SuggestionTemplate, DESCRIPTION_LENGTH, MIN_WORD_COUNT, RULES, TITLE_LENGTH,
};
pub use suggestions::suggest;
