//! Check pipeline
//!
//! Wires the stages together:
//! 1. Validate the target URL and fetch the page (`fetch`)
//! 2. Extract the signal set from markup (`extract`)
//! 3. Evaluate the rule table and derive suggestions (`scoring`)
//! 4. Stamp the result with the capture time
//!
//! Stages 2 and 3 are pure; [`analyze`] runs only those and is
//! deterministic for a given `(markup, url)` pair.

use crate::config::FetchConfig;
use crate::extract::extract;
use crate::fetch::{fetch_page, validate_target, FetchResult};
use crate::models::{CheckResult, SignalSet, Suggestion};
use crate::scoring::{suggest, Evaluation, RuleEngine};
use chrono::{DateTime, Utc};
use tracing::info;

/// Output of the pure core stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub signals: SignalSet,
    pub evaluation: Evaluation,
    pub suggestions: Vec<Suggestion>,
}

impl Analysis {
    /// Assemble the public result for `url`, captured at `checked_at`
    pub fn into_result(self, url: impl Into<String>, checked_at: DateTime<Utc>) -> CheckResult {
        CheckResult {
            url: url.into(),
            signals: self.signals,
            score: self.evaluation.score,
            suggestions: self.suggestions,
            checked_at,
        }
    }
}

/// Extract, evaluate and suggest. No I/O, no clock.
pub fn analyze(markup: &str, url: &str) -> Analysis {
    let engine = RuleEngine::default();
    let signals = extract(markup, url);
    let evaluation = engine.evaluate(&signals);
    let suggestions = suggest(&evaluation.per_rule, engine.rules());
    Analysis {
        signals,
        evaluation,
        suggestions,
    }
}

/// Check already-fetched markup, stamping the result with the current time
pub fn check_markup(markup: &str, url: &str) -> CheckResult {
    let result = analyze(markup, url).into_result(url, Utc::now());
    info!(
        "{}: score {} with {} suggestions",
        result.url,
        result.score,
        result.suggestions.len()
    );
    result
}

/// Validate, fetch and check a page
pub fn check_url(raw_url: &str, config: &FetchConfig) -> FetchResult<CheckResult> {
    let url = validate_target(raw_url)?;
    let page = fetch_page(&url, config)?;
    Ok(check_markup(&page.body, page.url.as_str()))
}
