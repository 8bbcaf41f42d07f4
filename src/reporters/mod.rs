//! Output reporters for check results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - The public result shape, pretty-printed or compact
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::models::CheckResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a check result in the specified format
pub fn report(result: &CheckResult, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(result, fmt, false)
}

/// Render a check result using an OutputFormat enum.
///
/// `compact` only affects JSON (single line, no indentation).
pub fn report_with_format(
    result: &CheckResult,
    format: OutputFormat,
    compact: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(result),
        OutputFormat::Json if compact => json::render_compact(result),
        OutputFormat::Json => json::render(result),
        OutputFormat::Markdown => markdown::render(result),
    }
}

/// Render several results, as produced by `aichecker batch`.
///
/// JSON output is a single array; the other formats concatenate per-page
/// reports.
pub fn report_many(results: &[CheckResult], format: OutputFormat, compact: bool) -> Result<String> {
    match format {
        OutputFormat::Json if compact => json::render_many_compact(results),
        OutputFormat::Json => json::render_many(results),
        OutputFormat::Text => {
            let parts = results.iter().map(text::render).collect::<Result<Vec<_>>>()?;
            Ok(parts.concat())
        }
        OutputFormat::Markdown => {
            let parts = results
                .iter()
                .map(markdown::render)
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join("\n---\n\n"))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Create a representative CheckResult for testing
    pub(crate) fn test_result() -> CheckResult {
        use crate::models::{
            ImageRef, LinkRef, PageContent, PageMeta, PageStructure, Priority, SignalSet,
            Suggestion,
        };

        CheckResult {
            url: "https://example.com/blog/post".into(),
            signals: SignalSet {
                meta: PageMeta {
                    title: Some("How we test our reporters in practice".into()),
                    description: Some("Short description".into()),
                    og_title: Some("Reporters".into()),
                    ..Default::default()
                },
                structure: PageStructure {
                    h1: vec!["Testing reporters".into()],
                    h2: vec!["Setup".into(), "Results".into()],
                    has_json_ld: true,
                    json_ld_types: vec!["Article".into()],
                    ..Default::default()
                },
                content: PageContent {
                    text: "Testing reporters Setup Results".into(),
                    word_count: 4,
                    images: vec![ImageRef {
                        src: "/hero.png".into(),
                        alt: String::new(),
                    }],
                    links: vec![LinkRef {
                        href: "/about".into(),
                        text: "About".into(),
                    }],
                },
            },
            score: 65,
            suggestions: vec![
                Suggestion {
                    priority: Priority::Medium,
                    category: "meta".into(),
                    message: "Meta description length is not ideal".into(),
                    detail: "Keep the description between 80 and 160 characters.".into(),
                },
                Suggestion {
                    priority: Priority::Low,
                    category: "seo".into(),
                    message: "Missing canonical tag".into(),
                    detail: "Add <link rel=\"canonical\">.".into(),
                },
            ],
            checked_at: chrono::Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("terminal").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
        assert!(OutputFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_report_by_name() {
        let result = test_result();
        let out = report(&result, "json").unwrap();
        assert!(out.contains("\"score\": 65"));
        assert!(report(&result, "yaml").is_err());
    }

    #[test]
    fn test_report_many_json_is_array() {
        let results = vec![test_result(), test_result()];
        let out = report_many(&results, OutputFormat::Json, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_report_many_markdown_separates_pages() {
        let results = vec![test_result(), test_result()];
        let out = report_many(&results, OutputFormat::Markdown, false).unwrap();
        assert_eq!(out.matches("\n---\n").count(), 1);
    }
}
