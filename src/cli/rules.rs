//! `rules` command: print the rule table

use crate::scoring::{total_weight, Rule, MAX_SCORE, RULES};
use anyhow::Result;
use console::style;

pub fn run(format: &str) -> Result<()> {
    let output = match format {
        "json" => serde_json::to_string_pretty(RULES)?,
        _ => render_text(RULES),
    };
    println!("{}", output);
    Ok(())
}

fn render_text(rules: &[Rule]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        style("Rules (evaluated in this order)").bold()
    ));
    out.push_str(&format!(
        "  {:<20} {:>6}  {:<8}  {}\n",
        style("RULE").dim(),
        style("WEIGHT").dim(),
        style("PRIORITY").dim(),
        style("SUGGESTION WHEN FAILED").dim()
    ));

    for rule in rules {
        let (priority, message) = match &rule.suggestion {
            Some(s) => (s.priority.to_string(), s.message),
            None => ("-".to_string(), "-"),
        };
        out.push_str(&format!(
            "  {:<20} {:>6}  {:<8}  {}\n",
            rule.name, rule.weight, priority, message
        ));
    }

    out.push_str(&format!(
        "\n  Total weight: {} (score is capped at {})\n",
        total_weight(),
        MAX_SCORE
    ));
    out
}
