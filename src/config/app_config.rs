//! Checker configuration
//!
//! Loads configuration from `aichecker.toml` or `.aicheckerrc.json` in the
//! working directory, falling back to `~/.config/aichecker/config.toml`.
//!
//! # Configuration Format
//!
//! ```toml
//! # aichecker.toml
//!
//! [fetch]
//! timeout_secs = 10
//! user_agent = "Mozilla/5.0 (compatible; AIChecker/1.0; +https://aichecker.dev)"
//! max_body_bytes = 5242880
//!
//! [defaults]
//! format = "text"
//! fail_under = 60
//! workers = 4
//! ```
//!
//! `AICHECKER_TIMEOUT_SECS` and `AICHECKER_USER_AGENT` override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "aichecker.toml";
const JSON_CONFIG_FILE_NAME: &str = ".aicheckerrc.json";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckerConfig {
    /// How pages are fetched
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Page fetch settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Response bodies larger than this are rejected (default: 5 MiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl FetchConfig {
    /// Reset zero limits to their defaults. A zero timeout or body limit
    /// would fail every fetch.
    fn sanitize(&mut self, source: &str) {
        if self.timeout_secs == 0 {
            warn!("Ignoring timeout_secs = 0 in {}, using {}", source, default_timeout_secs());
            self.timeout_secs = default_timeout_secs();
        }
        if self.max_body_bytes == 0 {
            warn!("Ignoring max_body_bytes = 0 in {}, using {}", source, default_max_body_bytes());
            self.max_body_bytes = default_max_body_bytes();
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; AIChecker/1.0; +https://aichecker.dev)".to_string()
}
fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string()
}
fn default_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}
fn default_max_body_bytes() -> u64 {
    5 * 1024 * 1024
}

/// Default CLI flags that can be set in config
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Exit with code 1 when the score is below this
    #[serde(default)]
    pub fail_under: Option<u32>,

    /// Default number of batch workers
    #[serde(default)]
    pub workers: Option<usize>,
}

impl CheckerConfig {
    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aichecker").join("config.toml"))
    }

    /// Apply environment variable overrides (highest priority)
    fn apply_env(&mut self) {
        if let Ok(secs) = std::env::var("AICHECKER_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.fetch.timeout_secs = secs,
                _ => warn!("Ignoring invalid AICHECKER_TIMEOUT_SECS={:?}", secs),
            }
        }
        if let Ok(agent) = std::env::var("AICHECKER_USER_AGENT") {
            if !agent.trim().is_empty() {
                self.fetch.user_agent = agent;
            }
        }
    }
}

/// Load configuration.
///
/// Searches in this order, first readable file wins:
/// 1. `<dir>/aichecker.toml`
/// 2. `<dir>/.aicheckerrc.json`
/// 3. user config (`~/.config/aichecker/config.toml` on Linux)
///
/// Returns defaults if nothing is found. Environment overrides apply last.
pub fn load_config(dir: &Path) -> CheckerConfig {
    let mut config = load_from_files(dir);
    config.apply_env();
    config
}

fn load_from_files(dir: &Path) -> CheckerConfig {
    let mut candidates = vec![dir.join(CONFIG_FILE_NAME), dir.join(JSON_CONFIG_FILE_NAME)];
    if let Some(user_path) = CheckerConfig::user_config_path() {
        candidates.push(user_path);
    }

    for path in candidates.iter().filter(|p| p.exists()) {
        match load_file(path) {
            Ok(mut config) => {
                debug!("Loaded config from {}", path.display());
                config.fetch.sanitize(&path.display().to_string());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    CheckerConfig::default()
}

fn load_file(path: &Path) -> anyhow::Result<CheckerConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

/// Example config written by `aichecker init`
pub fn example_config() -> &'static str {
    r#"# aichecker configuration

[fetch]
# Whole-request timeout in seconds
timeout_secs = 10

# User-Agent sent with every request
user_agent = "Mozilla/5.0 (compatible; AIChecker/1.0; +https://aichecker.dev)"

# Reject pages larger than this many bytes
max_body_bytes = 5242880

[defaults]
# Output format: text, json, markdown
format = "text"

# Exit with code 1 when the score is below this (useful in CI)
# fail_under = 60

# Parallel workers for `aichecker batch`
workers = 4
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckerConfig::default();
        assert_eq!(config.fetch.timeout_secs, 10);
        assert!(config.fetch.user_agent.contains("AIChecker/1.0"));
        assert_eq!(config.fetch.max_body_bytes, 5 * 1024 * 1024);
        assert!(config.defaults.format.is_none());
        assert!(config.defaults.fail_under.is_none());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
[fetch]
timeout_secs = 3
user_agent = "TestBot/2.0"

[defaults]
format = "json"
fail_under = 70
workers = 2
"#;
        let config: CheckerConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.fetch.timeout_secs, 3);
        assert_eq!(config.fetch.user_agent, "TestBot/2.0");
        // Unset keys keep their defaults
        assert_eq!(config.fetch.accept_language, "en-US,en;q=0.5");
        assert_eq!(config.defaults.format.as_deref(), Some("json"));
        assert_eq!(config.defaults.fail_under, Some(70));
        assert_eq!(config.defaults.workers, Some(2));
    }

    #[test]
    fn test_example_config_parses() {
        let config: CheckerConfig = toml::from_str(example_config()).unwrap();
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.defaults.format.as_deref(), Some("text"));
        assert_eq!(config.defaults.workers, Some(4));
    }

    #[test]
    fn test_load_from_dir_with_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[fetch]\ntimeout_secs = 7\n",
        )
        .unwrap();
        let config = load_from_files(dir.path());
        assert_eq!(config.fetch.timeout_secs, 7);
    }

    #[test]
    fn test_load_from_dir_with_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG_FILE_NAME),
            r#"{"defaults": {"format": "markdown"}}"#,
        )
        .unwrap();
        let config = load_from_files(dir.path());
        assert_eq!(config.defaults.format.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_broken_file_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "this is [not toml").unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG_FILE_NAME),
            r#"{"fetch": {"timeout_secs": 4}}"#,
        )
        .unwrap();
        let config = load_from_files(dir.path());
        assert_eq!(config.fetch.timeout_secs, 4);
    }

    #[test]
    fn test_zero_limits_in_file_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[fetch]\ntimeout_secs = 0\nmax_body_bytes = 0\nuser_agent = \"TestBot/2.0\"\n",
        )
        .unwrap();
        let config = load_from_files(dir.path());
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.fetch.max_body_bytes, 5 * 1024 * 1024);
        // Valid keys from the same file still apply
        assert_eq!(config.fetch.user_agent, "TestBot/2.0");
    }

    #[test]
    fn test_zero_limits_in_json_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG_FILE_NAME),
            r#"{"fetch": {"timeout_secs": 0, "max_body_bytes": 1024}}"#,
        )
        .unwrap();
        let config = load_from_files(dir.path());
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.fetch.max_body_bytes, 1024);
    }
}
