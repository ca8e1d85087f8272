// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::Severity;
use serde::{Deserialize, Serialize};

/// Name given to the check when no configuration names it
pub const DEFAULT_LINT_NAME: &str = "uninitialized";

/// A configured required-field check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UninitializedLint {
    pub name: String,
    #[serde(default)]
    pub severity: Severity,
    /// Regular expressions matched against `unit.Type` of a literal's resolved
    /// type. Literals of matching types are not checked.
    #[serde(default)]
    pub ignore_types: Vec<String>,
}

impl Default for UninitializedLint {
    fn default() -> Self {
        Self {
            name: DEFAULT_LINT_NAME.to_string(),
            severity: Severity::default(),
            ignore_types: Vec::new(),
        }
    }
}
