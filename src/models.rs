//! Core data models for aichecker
//!
//! These models are used throughout the codebase for representing
//! extracted page signals, suggestions, and check results. Field names
//! serialize in camelCase so the JSON output matches the public result shape.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Priority levels for suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high=0, medium=1, low=2
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// A prioritized improvement tied to one failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub priority: Priority,
    /// Category tag (meta, structure, structured-data, social, content, ...)
    #[serde(rename = "type")]
    pub category: String,
    pub message: String,
    pub detail: String,
}

/// Page metadata. Absent or blank values are `None`, never `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub canonical: Option<String>,
}

/// Structural markers: headings and structured data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub has_json_ld: bool,
    pub json_ld_types: Vec<String>,
    pub has_microdata: bool,
}

/// An image reference found in page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// An outbound or internal link found in page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub href: String,
    pub text: String,
}

/// Content statistics for the page body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// Normalized body text, truncated for display
    pub text: String,
    /// Word count over the full normalized text (before truncation)
    pub word_count: usize,
    pub images: Vec<ImageRef>,
    pub links: Vec<LinkRef>,
}

/// Everything the extractor learned about a page. Produced once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub meta: PageMeta,
    pub structure: PageStructure,
    pub content: PageContent,
}

/// The full result of checking one page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub url: String,
    #[serde(flatten)]
    pub signals: SignalSet,
    pub score: u32,
    pub suggestions: Vec<Suggestion>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    pub fn rating(&self) -> Rating {
        Rating::from_score(self.score)
    }
}

/// `2026-10-19T08:30:00.123Z`, the same shape JavaScript's `toISOString` emits
fn serialize_iso_millis<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Coarse label for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Rating {
    /// Calculate rating from score
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Rating::Excellent,
            s if s >= 60 => Rating::Good,
            _ => Rating::NeedsImprovement,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Excellent => write!(f, "Excellent"),
            Rating::Good => write!(f, "Good"),
            Rating::NeedsImprovement => write!(f, "Needs improvement"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Rating::from_score(100), Rating::Excellent);
        assert_eq!(Rating::from_score(80), Rating::Excellent);
        assert_eq!(Rating::from_score(79), Rating::Good);
        assert_eq!(Rating::from_score(60), Rating::Good);
        assert_eq!(Rating::from_score(59), Rating::NeedsImprovement);
        assert_eq!(Rating::from_score(0), Rating::NeedsImprovement);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
        assert_eq!(Priority::Medium.to_string(), "medium");
    }

    #[test]
    fn test_check_result_wire_shape() {
        let result = CheckResult {
            url: "https://example.com/".into(),
            signals: SignalSet::default(),
            score: 42,
            suggestions: vec![Suggestion {
                priority: Priority::Low,
                category: "seo".into(),
                message: "m".into(),
                detail: "d".into(),
            }],
            checked_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["url"], "https://example.com/");
        assert!(value["meta"]["title"].is_null());
        assert!(value["meta"]["ogDescription"].is_null());
        assert_eq!(value["structure"]["hasJsonLd"], false);
        assert!(value["structure"]["jsonLdTypes"].as_array().unwrap().is_empty());
        assert_eq!(value["content"]["wordCount"], 0);
        assert_eq!(value["score"], 42);
        assert_eq!(value["suggestions"][0]["type"], "seo");
        assert_eq!(value["suggestions"][0]["priority"], "low");
        assert_eq!(value["checkedAt"], "2026-10-19T08:30:00.000Z");

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(
            sorted,
            vec!["checkedAt", "content", "meta", "score", "structure", "suggestions", "url"]
        );
    }
}
