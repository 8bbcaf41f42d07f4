//! `batch` command: check many URLs in parallel

use super::check::{check_fail_threshold, write_output};
use super::OutputOptions;
use crate::config::CheckerConfig;
use crate::fetch::FetchError;
use crate::models::CheckResult;
use crate::pipeline::check_url;
use crate::reporters;
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Per-URL outcome, kept in input order
type BatchOutcome = (String, Result<CheckResult, FetchError>);

pub fn run(
    list: &Path,
    workers: usize,
    config: &CheckerConfig,
    options: &OutputOptions,
) -> Result<()> {
    let content = read_list(list)?;
    let urls = parse_url_list(&content);
    if urls.is_empty() {
        anyhow::bail!("No URLs found in {}", list.display());
    }

    let outcomes = check_all(&urls, workers, config)?;

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = 0usize;
    for (url, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", style("✗").red(), url, e);
            }
        }
    }

    if !results.is_empty() {
        let output = reporters::report_many(&results, options.format, options.compact)?;
        write_output(&output, options)?;
    }

    eprintln!(
        "{} {} checked, {} failed",
        style("Done:").bold(),
        style(results.len()).green(),
        style(failures).red()
    );

    if failures > 0 {
        eprintln!("Failing because {} URL(s) could not be checked", failures);
        std::process::exit(1);
    }
    let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
    check_fail_threshold(options.fail_under, &scores);
    Ok(())
}

fn read_list(list: &Path) -> Result<String> {
    if list.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read URL list from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(list).with_context(|| format!("Failed to read {}", list.display()))
    }
}

/// One URL per line; blank lines and `#` comments are skipped
fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_all(urls: &[String], workers: usize, config: &CheckerConfig) -> Result<Vec<BatchOutcome>> {
    let bar = ProgressBar::new(urls.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("█▓▒░  "),
    );
    bar.set_message("Checking pages...");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let outcomes: Vec<BatchOutcome> = pool.install(|| {
        urls.par_iter()
            .map(|url| {
                let outcome = check_url(url, &config.fetch);
                if let Err(e) = &outcome {
                    warn!("{}: {}", url, e);
                }
                bar.inc(1);
                (url.clone(), outcome)
            })
            .collect()
    });

    bar.finish_and_clear();
    Ok(outcomes)
}
