//! Suggestion generation from failed rules

use super::engine::RuleOutcome;
use super::rules::Rule;
use crate::models::Suggestion;

/// One suggestion per failed rule that carries a template, ordered by
/// priority (high, medium, low). Equal priorities keep rule-table order.
///
/// Outcomes whose name is not in `rules` are ignored.
pub fn suggest(outcomes: &[RuleOutcome], rules: &[Rule]) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = rules
        .iter()
        .filter(|rule| {
            outcomes
                .iter()
                .any(|outcome| outcome.name == rule.name && !outcome.passed)
        })
        .filter_map(|rule| rule.suggestion)
        .map(|template| Suggestion {
            priority: template.priority,
            category: template.category.to_string(),
            message: template.message.to_string(),
            detail: template.detail.to_string(),
        })
        .collect();

    // sort_by_key is stable, which keeps declaration order within a priority
    suggestions.sort_by_key(|s| s.priority.rank());
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, SignalSet};
    use crate::scoring::engine::evaluate;
    use crate::scoring::rules::RULES;

    fn outcome(name: &'static str, passed: bool) -> RuleOutcome {
        RuleOutcome { name, weight: 5, passed }
    }

    #[test]
    fn test_all_failed_sorted_by_priority_then_table_order() {
        let eval = evaluate(&SignalSet::default());
        let suggestions = suggest(&eval.per_rule, RULES);

        // imagesHaveAlt passes vacuously, everything else fails
        assert_eq!(suggestions.len(), RULES.len() - 1);

        let messages: Vec<_> = suggestions.iter().map(|s| s.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Missing page title",
                "Missing meta description",
                "Missing H1 heading",
                "Missing structured data (JSON-LD)",
                "Title length is not ideal",
                "Meta description length is not ideal",
                "Incorrect number of H1 headings",
                "Too little page content",
                "Missing Open Graph title",
                "Missing Open Graph description",
                "Missing Open Graph image",
                "Missing canonical tag",
            ]
        );
    }

    #[test]
    fn test_no_low_before_higher() {
        let eval = evaluate(&SignalSet::default());
        let suggestions = suggest(&eval.per_rule, RULES);
        for pair in suggestions.windows(2) {
            assert!(pair[0].priority.rank() <= pair[1].priority.rank());
        }
    }

    #[test]
    fn test_passed_rules_produce_nothing() {
        let outcomes: Vec<_> = RULES.iter().map(|r| outcome(r.name, true)).collect();
        assert!(suggest(&outcomes, RULES).is_empty());
    }

    #[test]
    fn test_single_failure() {
        let outcomes: Vec<_> = RULES
            .iter()
            .map(|r| outcome(r.name, r.name != "imagesHaveAlt"))
            .collect();
        let suggestions = suggest(&outcomes, RULES);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, Priority::Medium);
        assert_eq!(suggestions[0].category, "accessibility");
    }

    fn never(_: &SignalSet) -> bool {
        false
    }

    #[test]
    fn test_rules_without_template_are_skipped() {
        static BARE: &[Rule] = &[Rule {
            name: "bare",
            weight: 1,
            check: never,
            suggestion: None,
        }];
        assert!(suggest(&[outcome("bare", false)], BARE).is_empty());
    }

    #[test]
    fn test_unknown_outcomes_ignored() {
        assert!(suggest(&[outcome("notARule", false)], RULES).is_empty());
    }
}
