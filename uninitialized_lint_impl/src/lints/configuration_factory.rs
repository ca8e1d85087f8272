// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::helpers::rule_collection::RuleCollection;
use crate::lints::required_fields_lint::RequiredFieldsLint;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use uninitialized_lint_config::{ConfiguredLint, LintBuilder, UninitializedLintExt};

///
/// Turns lint configuration into rules ready to run.
///
pub struct LintConfigurationFactory;

impl LintConfigurationFactory {
    pub fn from_file(path: &Path) -> Result<RuleCollection> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read configuration file: {}", path.display()))?;
        Self::from_content(&content)
            .context(format!("Invalid configuration in: {}", path.display()))
    }

    pub fn from_content(content: &str) -> Result<RuleCollection> {
        let builder = LintBuilder::from_ron_str(content)?;
        Self::from_builder(&builder)
    }

    pub fn from_builder(builder: &LintBuilder) -> Result<RuleCollection> {
        let rules = builder
            .lints
            .iter()
            .map(|lint| {
                debug!(lint = lint.name(), "configuring lint");
                match lint {
                    ConfiguredLint::Uninitialized(_) => RequiredFieldsLint::new(lint),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleCollection::new(rules))
    }

    /// The rules used when no configuration is given: the check under its
    /// default name, reporting errors.
    pub fn default_rules() -> Result<RuleCollection> {
        let mut builder = LintBuilder::new();
        builder.uninitialized_lint().default_name().build();
        Self::from_builder(&builder)
    }
}
