//! aichecker - AI readability checks for web pages
//!
//! Extracts the signals AI agents rely on (metadata, headings, structured
//! data, content), scores them against a fixed weighted rule table and
//! produces prioritized suggestions for every failed rule.
//!
//! ```no_run
//! let result = aichecker::pipeline::check_markup(
//!     "<html><head><title>Hello</title></head><body></body></html>",
//!     "https://example.com/",
//! );
//! println!("{}/100", result.score);
//! ```

pub mod cli;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
