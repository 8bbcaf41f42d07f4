//! Text (terminal) reporter with colors and formatting

use crate::models::{CheckResult, Priority, Rating};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\x1b[91m",  // Light red
        Priority::Medium => "\x1b[33m", // Yellow
        Priority::Low => "\x1b[34m",   // Blue
    }
}

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "[H]",
        Priority::Medium => "[M]",
        Priority::Low => "[L]",
    }
}

/// Render result as formatted terminal output
pub fn render(result: &CheckResult) -> Result<String> {
    let mut out = String::new();
    let signals = &result.signals;

    // Header
    out.push_str(&format!("\n{BOLD}AI Readability Check{RESET}  {}\n", result.url));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {}  Rating: {BOLD}{}{RESET}\n\n",
        format_score(result.score),
        result.rating()
    ));

    // Signals (compact)
    out.push_str(&format!("{BOLD}SIGNALS{RESET}\n"));
    out.push_str(&format!(
        "  Title: {}\n",
        display_or_missing(signals.meta.title.as_deref())
    ));
    out.push_str(&format!(
        "  Description: {}\n",
        display_or_missing(signals.meta.description.as_deref())
    ));
    out.push_str(&format!(
        "  Headings: {} h1, {} h2, {} h3\n",
        signals.structure.h1.len(),
        signals.structure.h2.len(),
        signals.structure.h3.len()
    ));
    let json_ld = if signals.structure.json_ld_types.is_empty() {
        "none".to_string()
    } else {
        signals.structure.json_ld_types.join(", ")
    };
    out.push_str(&format!("  JSON-LD: {}\n", json_ld));
    let missing_alt = signals
        .content
        .images
        .iter()
        .filter(|img| img.alt.is_empty())
        .count();
    out.push_str(&format!(
        "  Words: {}  Images: {} ({} without alt)  Links: {}\n\n",
        signals.content.word_count,
        signals.content.images.len(),
        missing_alt,
        signals.content.links.len()
    ));

    // Suggestions
    out.push_str(&format!(
        "{BOLD}SUGGESTIONS{RESET} ({} total)\n",
        result.suggestions.len()
    ));
    if result.suggestions.is_empty() {
        out.push_str(&format!("  {DIM}Nothing to improve.{RESET}\n"));
    }
    for suggestion in &result.suggestions {
        let color = priority_color(suggestion.priority);
        out.push_str(&format!(
            "  {color}{}{RESET}  {:<40}  {DIM}{}{RESET}\n",
            priority_tag(suggestion.priority),
            suggestion.message,
            suggestion.category
        ));
        out.push_str(&format!("       {DIM}{}{RESET}\n", suggestion.detail));
    }
    out.push('\n');

    // Tips based on rating
    match result.rating() {
        Rating::Excellent => out.push_str(&format!(
            "{DIM}Excellent! This page is easy for AI systems to read.{RESET}\n"
        )),
        Rating::Good => out.push_str(&format!(
            "{DIM}Good shape. Address the high priority items first.{RESET}\n"
        )),
        Rating::NeedsImprovement => out.push_str(&format!(
            "{DIM}Run `aichecker rules` to see what each check expects.{RESET}\n"
        )),
    }

    Ok(out)
}

fn display_or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if v.chars().count() > 60 => {
            format!("{}...", v.chars().take(57).collect::<String>())
        }
        Some(v) => v.to_string(),
        None => format!("{DIM}(missing){RESET}"),
    }
}

/// Format score with color
fn format_score(score: u32) -> String {
    let color = if score >= 80 {
        "\x1b[32m"
    } else if score >= 60 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{BOLD}{}/100{RESET}", score)
}
