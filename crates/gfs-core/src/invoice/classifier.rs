//! Line classifier running every line rule over a single line.

use tracing::trace;

use super::rules::{ItemRowRule, LineMatch, LineRule, SurchargeRule};

/// Runs a set of independent line rules over each line.
pub struct LineClassifier {
    rules: Vec<Box<dyn LineRule>>,
}

impl LineClassifier {
    /// Create a classifier with the item row, container deposit and ecology fee rules.
    pub fn new() -> Self {
        Self::with_rules(vec![
            Box::new(ItemRowRule::new()),
            Box::new(SurchargeRule::container_deposit()),
            Box::new(SurchargeRule::ecology_fee()),
        ])
    }

    /// Create a classifier from an explicit rule list, applied in order.
    pub fn with_rules(rules: Vec<Box<dyn LineRule>>) -> Self {
        Self { rules }
    }

    /// Add a rule after the existing ones.
    pub fn with_rule(mut self, rule: impl LineRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Classify one line. Every rule is tried; an empty result means no match.
    pub fn classify(&self, line: &str) -> Vec<LineMatch> {
        let line = line.trim();
        let tokens: Vec<&str> = line.split_whitespace().collect();

        self.rules
            .iter()
            .filter_map(|rule| {
                let found = rule.apply(line, &tokens)?;
                trace!("Rule {} matched line {:?}", rule.name(), line);
                Some(found)
            })
            .collect()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
