//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Issue trackers
//! - Documentation

use crate::models::{CheckResult, Priority, Rating, Suggestion};
use anyhow::Result;

/// Maximum headings listed per level
const MAX_HEADINGS_SHOWN: usize = 10;

/// Render result as GitHub-flavored Markdown
pub fn render(result: &CheckResult) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(result));
    md.push('\n');

    md.push_str(&render_summary(result));
    md.push('\n');

    md.push_str(&render_signals(result));
    md.push('\n');

    md.push_str(&render_headings(result));
    md.push('\n');

    md.push_str(&render_suggestions(result));
    md.push('\n');

    md.push_str(&render_footer(result));

    Ok(md)
}

fn render_header(result: &CheckResult) -> String {
    let rating_emoji = match result.rating() {
        Rating::Excellent => "🏆",
        Rating::Good => "⭐",
        Rating::NeedsImprovement => "⚠️",
    };

    format!(
        r#"# {} AI Readability Report

**Score: {}/100** | **Rating: {}**

URL: <{}>
"#,
        rating_emoji,
        result.score,
        result.rating(),
        result.url
    )
}

fn render_summary(result: &CheckResult) -> String {
    let count = |p: Priority| result.suggestions.iter().filter(|s| s.priority == p).count();

    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Score** | {}/100 |
| **Rating** | {} |
| **Suggestions** | {} ({} high, {} medium, {} low) |
| **Word Count** | {} |
"#,
        result.score,
        result.rating(),
        result.suggestions.len(),
        count(Priority::High),
        count(Priority::Medium),
        count(Priority::Low),
        result.signals.content.word_count
    )
}

fn render_signals(result: &CheckResult) -> String {
    let meta = &result.signals.meta;
    let structure = &result.signals.structure;
    let content = &result.signals.content;

    let json_ld = if structure.json_ld_types.is_empty() {
        "none".to_string()
    } else {
        structure
            .json_ld_types
            .iter()
            .map(|t| escape(t.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let missing_alt = content
        .images
        .iter()
        .filter(|img| img.alt.is_empty())
        .count();

    format!(
        r#"## Signals

| Signal | Value |
|--------|-------|
| Title | {} |
| Description | {} |
| Open Graph title | {} |
| Open Graph description | {} |
| Open Graph image | {} |
| Canonical | {} |
| JSON-LD types | {} |
| Microdata | {} |
| Images | {} ({} without alt) |
| Links | {} |
"#,
        cell(meta.title.as_deref()),
        cell(meta.description.as_deref()),
        cell(meta.og_title.as_deref()),
        cell(meta.og_description.as_deref()),
        cell(meta.og_image.as_deref()),
        cell(meta.canonical.as_deref()),
        json_ld,
        if structure.has_microdata { "yes" } else { "no" },
        content.images.len(),
        missing_alt,
        content.links.len()
    )
}

fn render_headings(result: &CheckResult) -> String {
    let structure = &result.signals.structure;
    let mut md = String::from("## Headings\n\n");

    let levels = [
        ("h1", &structure.h1),
        ("h2", &structure.h2),
        ("h3", &structure.h3),
    ];
    if levels.iter().all(|(_, headings)| headings.is_empty()) {
        md.push_str("No headings found.\n");
        return md;
    }

    for (level, headings) in levels {
        if headings.is_empty() {
            continue;
        }
        md.push_str(&format!("**{}** ({})\n\n", level.to_uppercase(), headings.len()));
        for heading in headings.iter().take(MAX_HEADINGS_SHOWN) {
            md.push_str(&format!("- {}\n", escape(heading)));
        }
        let hidden = headings.len().saturating_sub(MAX_HEADINGS_SHOWN);
        if hidden > 0 {
            md.push_str(&format!("- *...and {} more*\n", hidden));
        }
        md.push('\n');
    }

    md
}

fn render_suggestions(result: &CheckResult) -> String {
    let mut md = String::from("## Suggestions\n\n");

    if result.suggestions.is_empty() {
        md.push_str("✅ Nothing to improve. This page is easy for AI systems to read.\n");
        return md;
    }

    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        let group: Vec<&Suggestion> = result
            .suggestions
            .iter()
            .filter(|s| s.priority == priority)
            .collect();
        if group.is_empty() {
            continue;
        }

        md.push_str(&format!(
            "### {} {} Priority ({})\n\n",
            priority_emoji(priority),
            capitalize(&priority.to_string()),
            group.len()
        ));
        for suggestion in group {
            md.push_str(&format!("#### {}\n\n", suggestion.message));
            md.push_str(&format!("`{}`\n\n", suggestion.category));
            md.push_str(&format!("> **💡 Fix:** {}\n\n", suggestion.detail));
        }
    }

    md
}

fn render_footer(result: &CheckResult) -> String {
    format!(
        "*Checked by aichecker on {}*\n",
        result.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn cell(value: Option<&str>) -> String {
    match value {
        Some(v) => escape(v),
        None => "❌ missing".to_string(),
    }
}

/// Keep page text from breaking table cells or opening code spans
fn escape(s: &str) -> String {
    s.replace('|', "\\|")
        .replace('`', "\\`")
        .replace(['\n', '\r'], " ")
}

fn priority_emoji(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🔵",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
