//! Rule engine
//!
//! Evaluates a signal set against a rule table. Pure and deterministic: no
//! I/O, no shared mutable state, safe to call from any number of threads.

use super::rules::{Rule, RULES};
use crate::models::SignalSet;
use serde::Serialize;
use tracing::{debug, trace};

/// Highest score a page can get
pub const MAX_SCORE: u32 = 100;

/// Pass/fail record for one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub name: &'static str,
    pub weight: u32,
    pub passed: bool,
}

/// Result of evaluating every rule against one signal set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Sum of passing weights, clamped to `0..=MAX_SCORE`
    pub score: u32,
    /// Sum of passing weights before clamping
    pub raw_total: u32,
    /// One outcome per rule, in rule-table order
    pub per_rule: Vec<RuleOutcome>,
}

impl Evaluation {
    pub fn failed(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.per_rule.iter().filter(|outcome| !outcome.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.per_rule.iter().filter(|outcome| outcome.passed).count()
    }
}

/// Evaluates signal sets against a fixed rule table
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    rules: &'static [Rule],
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(RULES)
    }
}

impl RuleEngine {
    pub fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Apply every rule in declaration order and total the passing weights
    pub fn evaluate(&self, signals: &SignalSet) -> Evaluation {
        let mut raw_total = 0u32;
        let per_rule: Vec<RuleOutcome> = self
            .rules
            .iter()
            .map(|rule| {
                let passed = (rule.check)(signals);
                if passed {
                    raw_total = raw_total.saturating_add(rule.weight);
                }
                trace!(
                    "rule {} ({}): {}",
                    rule.name,
                    rule.weight,
                    if passed { "pass" } else { "fail" }
                );
                RuleOutcome {
                    name: rule.name,
                    weight: rule.weight,
                    passed,
                }
            })
            .collect();

        let evaluation = Evaluation {
            score: raw_total.min(MAX_SCORE),
            raw_total,
            per_rule,
        };
        debug!(
            "Score: {} (raw {}, {}/{} rules passed)",
            evaluation.score,
            evaluation.raw_total,
            evaluation.passed_count(),
            evaluation.per_rule.len()
        );
        evaluation
    }
}

/// Evaluate against the built-in rule table
pub fn evaluate(signals: &SignalSet) -> Evaluation {
    RuleEngine::default().evaluate(signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageRef, Priority};
    use crate::scoring::rules::SuggestionTemplate;

    fn always(_: &SignalSet) -> bool {
        true
    }

    fn never(_: &SignalSet) -> bool {
        false
    }

    static OVERWEIGHT: &[Rule] = &[
        Rule { name: "a", weight: 60, check: always, suggestion: None },
        Rule { name: "b", weight: 45, check: always, suggestion: None },
        Rule {
            name: "c",
            weight: 5,
            check: never,
            suggestion: Some(SuggestionTemplate {
                priority: Priority::Low,
                category: "x",
                message: "m",
                detail: "d",
            }),
        },
    ];

    #[test]
    fn test_empty_signals_score() {
        let eval = evaluate(&SignalSet::default());
        // Only imagesHaveAlt passes vacuously
        assert_eq!(eval.score, 5);
        assert_eq!(eval.passed_count(), 1);
        assert_eq!(eval.per_rule.len(), RULES.len());
        assert!(eval.per_rule.iter().find(|o| o.name == "imagesHaveAlt").unwrap().passed);
    }

    #[test]
    fn test_outcomes_follow_table_order() {
        let eval = evaluate(&SignalSet::default());
        let names: Vec<_> = eval.per_rule.iter().map(|o| o.name).collect();
        let table: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, table);
    }

    #[test]
    fn test_score_clamps_at_max() {
        let eval = RuleEngine::new(OVERWEIGHT).evaluate(&SignalSet::default());
        assert_eq!(eval.raw_total, 105);
        assert_eq!(eval.score, MAX_SCORE);
        assert_eq!(eval.failed().map(|o| o.name).collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_failing_image_alt_costs_its_weight() {
        let mut signals = SignalSet::default();
        signals.content.images.push(ImageRef { src: "x.png".into(), alt: String::new() });
        let eval = evaluate(&signals);
        assert_eq!(eval.score, 0);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let mut signals = SignalSet::default();
        signals.meta.title = Some("A reasonably descriptive page title".into());
        signals.structure.h1 = vec!["One".into(), "Two".into()];
        let first = evaluate(&signals);
        for _ in 0..10 {
            assert_eq!(evaluate(&signals), first);
        }
    }
}
