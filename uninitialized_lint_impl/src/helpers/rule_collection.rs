// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::check_rule::CheckRule;

///
/// Collects a set of checks configured
/// and ready to run.
///
pub struct RuleCollection {
    rules: Vec<Box<dyn CheckRule>>,
}

impl RuleCollection {
    pub fn new(rules: Vec<Box<dyn CheckRule>>) -> RuleCollection {
        RuleCollection { rules }
    }

    pub fn rules(&self) -> &[Box<dyn CheckRule>] {
        &self.rules
    }

    pub fn names(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
