//! `check` and `file` commands: check a single page and emit the report

use super::OutputOptions;
use crate::config::CheckerConfig;
use crate::models::CheckResult;
use crate::pipeline::{check_markup, check_url};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Source URL reported for markup read from stdin without `--url`
const STDIN_URL: &str = "stdin";

/// Fetch and check one URL
pub fn run_url(url: &str, config: &CheckerConfig, options: &OutputOptions) -> Result<()> {
    let result = check_url(url, &config.fetch)?;
    emit(&result, options)
}

/// Check markup from a local file or stdin
pub fn run_file(path: &Path, url: Option<&str>, options: &OutputOptions) -> Result<()> {
    let from_stdin = path.as_os_str() == "-";
    let bytes = if from_stdin {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read markup from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    // Third-party pages are not always valid UTF-8
    let markup = String::from_utf8_lossy(&bytes);

    let source_url = match url {
        Some(u) => u.to_string(),
        None if from_stdin => STDIN_URL.to_string(),
        None => file_url(path)?,
    };
    info!("Checking {} bytes of markup as {}", bytes.len(), source_url);

    let result = check_markup(&markup, &source_url);
    emit(&result, options)
}

/// `file://` URL for a local path
fn file_url(path: &Path) -> Result<String> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    let url = url::Url::from_file_path(&absolute)
        .map_err(|_| anyhow::anyhow!("Cannot express {} as a URL", absolute.display()))?;
    Ok(url.to_string())
}

/// Render, write, then apply the `--fail-under` threshold
fn emit(result: &CheckResult, options: &OutputOptions) -> Result<()> {
    let output = reporters::report_with_format(result, options.format, options.compact)?;
    write_output(&output, options)?;
    check_fail_threshold(options.fail_under, &[result.score]);
    Ok(())
}

/// Write rendered output to `--output` (with a note on stderr) or stdout
pub(super) fn write_output(output: &str, options: &OutputOptions) -> Result<()> {
    match &options.output {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            // stderr keeps stdout clean for piping
            eprintln!(
                "{} Report written to: {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => {
            if options.format == OutputFormat::Json {
                println!("{}", output);
            } else {
                print!("{}", output);
            }
        }
    }
    Ok(())
}

/// Whether any score falls below the threshold
pub(super) fn fails_threshold(fail_under: Option<u32>, scores: &[u32]) -> bool {
    match fail_under {
        Some(threshold) => scores.iter().any(|&score| score < threshold),
        None => false,
    }
}

/// Exit with code 1 if the threshold is not met
pub(super) fn check_fail_threshold(fail_under: Option<u32>, scores: &[u32]) {
    if fails_threshold(fail_under, scores) {
        eprintln!(
            "Failing due to --fail-under={} threshold",
            fail_under.unwrap_or_default()
        );
        std::process::exit(1);
    }
}
