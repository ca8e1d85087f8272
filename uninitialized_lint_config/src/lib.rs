// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod lint_builder;
mod uninitialized_lint;

pub use lint_builder::{DEFAULT_CONFIG_FILE, LintBuilder};
pub use uninitialized_lint::{
    DEFAULT_LINT_NAME, UninitializedConstraintBuilder, UninitializedLint, UninitializedLintBuilder,
    UninitializedLintExt,
};

use serde::{Deserialize, Serialize};

/// How loudly a configured lint reports
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warn,
    #[default]
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfiguredLint {
    Uninitialized(UninitializedLint),
}

impl ConfiguredLint {
    pub fn name(&self) -> &str {
        match self {
            ConfiguredLint::Uninitialized(lint) => &lint.name,
        }
    }
}
