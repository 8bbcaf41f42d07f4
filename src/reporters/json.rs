//! JSON reporter
//!
//! Outputs the public result shape (`url`, `meta`, `structure`, `content`,
//! `score`, `suggestions`, `checkedAt`). Useful for piping to jq.

use crate::models::CheckResult;
use anyhow::Result;

/// Render result as pretty JSON
pub fn render(result: &CheckResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render result as compact JSON (single line)
pub fn render_compact(result: &CheckResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}

pub fn render_many(results: &[CheckResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

pub fn render_many_compact(results: &[CheckResult]) -> Result<String> {
    Ok(serde_json::to_string(results)?)
}
