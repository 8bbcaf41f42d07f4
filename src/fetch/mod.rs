//! Page fetching
//!
//! Retrieves the markup for a target URL. This sits outside the scoring core:
//! the extractor and rule engine only ever see markup that was already
//! fetched successfully. Uses ureq (sync HTTP), no async runtime needed.

use crate::config::FetchConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Errors that can occur while validating or fetching a target URL
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{scheme}' (only http and https can be checked)")]
    UnsupportedScheme { scheme: String },

    #[error("Request to {url} timed out after {secs}s (the site is responding too slowly)")]
    Timeout { url: String, secs: u64 },

    #[error("Could not reach {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("Could not access {url} (HTTP {status})")]
    HttpStatus { url: String, status: u16 },

    #[error("Response from {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("Failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// HTTP-style status for this failure: 400 for bad input, 504 for a
    /// timeout, 502 for everything upstream.
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::InvalidUrl { .. } | FetchError::UnsupportedScheme { .. } => 400,
            FetchError::Timeout { .. } => 504,
            FetchError::Unreachable { .. }
            | FetchError::HttpStatus { .. }
            | FetchError::BodyTooLarge { .. }
            | FetchError::Body { .. } => 502,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Markup retrieved from a page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

/// Parse and validate a target URL: absolute, http or https, with a host
pub fn validate_target(raw: &str) -> FetchResult<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| FetchError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::InvalidUrl {
            url: trimmed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

fn make_agent(config: &FetchConfig) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // Status codes are mapped to FetchError below
        .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
        .build()
        .new_agent()
}

/// Fetch a page's markup with a bounded timeout.
///
/// Non-2xx responses are errors; the body is never read for them.
pub fn fetch_page(url: &Url, config: &FetchConfig) -> FetchResult<FetchedPage> {
    let agent = make_agent(config);
    debug!("GET {}", url);

    let response = agent
        .get(url.as_str())
        .header("User-Agent", &config.user_agent)
        .header("Accept", &config.accept)
        .header("Accept-Language", &config.accept_language)
        .call()
        .map_err(|e| map_transport_error(e, url, config))?;

    let status = response.status().as_u16();
    debug!("{} -> HTTP {}", url, status);
    if !response.status().is_success() {
        warn!("{} returned HTTP {}", url, status);
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response
        .into_body()
        .with_config()
        .limit(config.max_body_bytes)
        .read_to_vec()
        .map_err(|e| match e {
            ureq::Error::BodyExceedsLimit(_) => FetchError::BodyTooLarge {
                url: url.to_string(),
                limit: config.max_body_bytes,
            },
            ureq::Error::Timeout(_) => map_transport_error(e, url, config),
            other => FetchError::Body {
                url: url.to_string(),
                message: other.to_string(),
            },
        })?;
    debug!("{}: read {} bytes", url, bytes.len());

    Ok(FetchedPage {
        url: url.clone(),
        // Pages in the wild are not always valid UTF-8
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn map_transport_error(error: ureq::Error, url: &Url, config: &FetchConfig) -> FetchError {
    warn!("Fetching {} failed: {}", url, error);
    match error {
        ureq::Error::Timeout(_) => FetchError::Timeout {
            url: url.to_string(),
            secs: config.timeout_secs,
        },
        ureq::Error::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => FetchError::Timeout {
            url: url.to_string(),
            secs: config.timeout_secs,
        },
        other => FetchError::Unreachable {
            url: url.to_string(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_http_and_https() {
        let url = validate_target("https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
        assert!(validate_target("  http://example.com/a?b=c  ").is_ok());
    }

    #[test]
    fn test_validate_rejects_relative() {
        let err = validate_target("/just/a/path").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert_eq!(err.status_code(), 400);
        assert!(validate_target("example.com").is_err());
        assert!(validate_target("").is_err());
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        let err = validate_target("ftp://example.com/file").unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme { ref scheme } if scheme == "ftp"));
        assert!(validate_target("javascript:alert(1)").is_err());
        assert!(validate_target("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_status_codes() {
        let timeout = FetchError::Timeout { url: "u".into(), secs: 10 };
        assert_eq!(timeout.status_code(), 504);
        let status = FetchError::HttpStatus { url: "u".into(), status: 404 };
        assert_eq!(status.status_code(), 502);
        assert_eq!(status.to_string(), "Could not access u (HTTP 404)");
    }

    #[test]
    fn test_unreachable_host_is_an_error() {
        // Port 9 on localhost (discard) is closed on any sane test machine
        let url = validate_target("http://127.0.0.1:9/").unwrap();
        let config = FetchConfig {
            timeout_secs: 2,
            ..Default::default()
        };
        let err = fetch_page(&url, &config).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Unreachable { .. } | FetchError::Timeout { .. }
        ));
    }
}
