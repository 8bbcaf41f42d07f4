//! CLI command definitions and handlers

mod batch;
mod check;
mod init;
mod rules;

use crate::config::{load_config, CheckerConfig};
use crate::reporters::OutputFormat;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Default batch worker count when neither the flag nor config sets one
const DEFAULT_WORKERS: usize = 4;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    check_workers(n)
}

fn check_workers(n: usize) -> Result<usize, String> {
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a --fail-under threshold (0-100)
fn parse_threshold(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid score", s))?;
    check_threshold(n)
}

fn check_threshold(n: u32) -> Result<u32, String> {
    if n > 100 {
        Err("threshold cannot exceed 100".to_string())
    } else {
        Ok(n)
    }
}

/// `defaults.workers` from config, dropped with a warning when out of range
fn config_workers(config: &CheckerConfig) -> Option<usize> {
    let n = config.defaults.workers?;
    check_workers(n)
        .map_err(|e| warn!("Ignoring workers = {} in config: {}", n, e))
        .ok()
}

/// `defaults.fail_under` from config, dropped with a warning when out of range
fn config_fail_under(config: &CheckerConfig) -> Option<u32> {
    let n = config.defaults.fail_under?;
    check_threshold(n)
        .map_err(|e| warn!("Ignoring fail_under = {} in config: {}", n, e))
        .ok()
}

/// aichecker - How well can AI systems read your page?
#[derive(Parser, Debug)]
#[command(name = "aichecker")]
#[command(
    version,
    about = "Score how readable a web page is for AI systems and get prioritized fixes",
    long_about = "aichecker fetches a page, extracts its metadata, headings, structured data \
and content, scores it against a fixed table of weighted rules (0-100) and lists \
prioritized suggestions for every rule it fails.",
    after_help = "\
Examples:
  aichecker check https://example.com              Check one page
  aichecker check https://example.com -f json      JSON output for scripting
  aichecker file page.html --url https://x.dev/    Check saved markup
  aichecker batch urls.txt --workers 8             Check many pages in parallel
  aichecker rules                                  Show the rule table"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output flags shared by `check` and `file`
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: text, json, markdown (or md)
    #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
    pub format: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Exit with code 1 if the score is below this value (CI mode)
    #[arg(long, value_parser = parse_threshold)]
    pub fail_under: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a page and check it
    #[command(after_help = "\
Examples:
  aichecker check https://example.com
  aichecker check https://example.com --format markdown -o report.md
  aichecker check https://example.com --fail-under 70")]
    Check {
        /// Absolute http(s) URL of the page
        url: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check markup from a local file (use - for stdin)
    File {
        /// Path to an HTML file, or - to read stdin
        path: PathBuf,

        /// URL the markup was served from (default: file:// URL of PATH)
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check every URL listed in a file, one per line ('#' starts a comment)
    Batch {
        /// File with one URL per line (use - for stdin)
        list: PathBuf,

        /// Number of parallel workers (1-64)
        #[arg(long, value_parser = parse_workers)]
        workers: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the rule table
    Rules {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an example aichecker.toml to the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Output settings after merging CLI flags over config defaults
#[derive(Debug, Clone)]
pub(crate) struct OutputOptions {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub fail_under: Option<u32>,
}

impl OutputOptions {
    fn resolve(args: &OutputArgs, config: &CheckerConfig) -> Result<Self> {
        let format = args
            .format
            .as_deref()
            .or(config.defaults.format.as_deref())
            .unwrap_or("text");
        let format = OutputFormat::from_str(format).context("Invalid output format")?;
        Ok(Self {
            format,
            output: args.output.clone(),
            compact: args.compact,
            fail_under: args.fail_under.or_else(|| config_fail_under(config)),
        })
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = load_config(&cwd);

    match cli.command {
        Commands::Check { url, output } => {
            let options = OutputOptions::resolve(&output, &config)?;
            check::run_url(&url, &config, &options)
        }
        Commands::File { path, url, output } => {
            let options = OutputOptions::resolve(&output, &config)?;
            check::run_file(&path, url.as_deref(), &options)
        }
        Commands::Batch {
            list,
            workers,
            output,
        } => {
            let options = OutputOptions::resolve(&output, &config)?;
            let workers = workers
                .or_else(|| config_workers(&config))
                .unwrap_or(DEFAULT_WORKERS);
            batch::run(&list, workers, &config, &options)
        }
        Commands::Rules { format } => rules::run(&format),
        Commands::Init { force } => init::run(&cwd, force),
    }
}
