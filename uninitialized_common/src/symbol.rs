// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a declared type across compilation units: the declaring unit's
/// import path plus the type name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub unit: String,
    pub name: String,
}

impl Symbol {
    pub fn new(unit: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.unit, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_display_and_ordering() {
        let a = Symbol::new("example.com/a", "Foo");
        let b = Symbol::new("example.com/b", "Bar");
        assert_eq!(a.to_string(), "example.com/a.Foo");
        assert!(a < b);
    }
}
