//! Configuration module for aichecker
//!
//! This module handles:
//! - Fetch settings (timeout, headers, body size limit)
//! - CLI defaults
//! - Environment variable overrides

mod app_config;

pub use app_config::{
    example_config, load_config, CheckerConfig, CliDefaults, FetchConfig, CONFIG_FILE_NAME,
};
