// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use super::types::{DEFAULT_LINT_NAME, UninitializedLint};
use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, Severity};

/// Extension trait that adds the required-field check to LintBuilder
pub trait UninitializedLintExt {
    /// Start building a required-field check
    fn uninitialized_lint(&mut self) -> UninitializedLintBuilder<'_>;
}

impl UninitializedLintExt for LintBuilder {
    fn uninitialized_lint(&mut self) -> UninitializedLintBuilder<'_> {
        UninitializedLintBuilder { parent: self }
    }
}

/// Initial builder for the required-field check
pub struct UninitializedLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> UninitializedLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> UninitializedConstraintBuilder<'a> {
        UninitializedConstraintBuilder {
            parent: self.parent,
            name: name.into(),
            severity: Severity::default(),
            ignore_types: Vec::new(),
        }
    }

    /// Keep the default lint name
    ///
    /// # Example
    /// ```
    /// use uninitialized_lint_config::{LintBuilder, Severity, UninitializedLintExt};
    /// let mut lint_builder = LintBuilder::new();
    /// lint_builder.uninitialized_lint()
    ///     .default_name()
    ///     .with_severity(Severity::Warn)
    ///     .build();
    /// ```
    pub fn default_name(self) -> UninitializedConstraintBuilder<'a> {
        self.lint_named(DEFAULT_LINT_NAME)
    }
}

/// Builder for the settings of a required-field check
pub struct UninitializedConstraintBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    severity: Severity,
    ignore_types: Vec<String>,
}

impl<'a> UninitializedConstraintBuilder<'a> {
    /// Set the severity of the diagnostics this check emits
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Skip literals whose resolved `unit.Type` matches the given pattern
    pub fn ignore_type(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_types.push(pattern.into());
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::Uninitialized(UninitializedLint {
            name: self.name,
            severity: self.severity,
            ignore_types: self.ignore_types,
        });
        self.parent.push(lint);
        self.parent
    }
}
