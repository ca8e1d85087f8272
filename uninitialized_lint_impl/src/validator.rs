// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::fact_store::FactStore;
use crate::provider::{ConstructionExpression, Resolution, SyntaxProvider};
use crate::required_fields::{RequiredFieldSet, extract_required_fields};
use regex::RegexSet;
use tracing::debug;
use uninitialized_common::{Element, Position, Symbol};

/// A literal that leaves required fields out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub type_name: Option<String>,
    pub missing: RequiredFieldSet,
    pub position: Position,
}

///
/// Types whose literals are never checked, matched by `unit.Type`.
///
#[derive(Debug, Clone)]
pub struct TypeFilter {
    patterns: Option<RegexSet>,
}

impl TypeFilter {
    pub fn none() -> Self {
        Self { patterns: None }
    }

    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = RegexSet::new(patterns)?;
        Ok(Self {
            patterns: (!set.is_empty()).then_some(set),
        })
    }

    pub fn is_ignored(&self, symbol: &Symbol) -> bool {
        self.patterns
            .as_ref()
            .is_some_and(|set| set.is_match(&symbol.to_string()))
    }
}

impl Default for TypeFilter {
    fn default() -> Self {
        Self::none()
    }
}

///
/// Subtract the keys a literal supplies from its required set. Only keyed
/// elements with an identifier key count; positional elements never match a
/// key, even when they initialize every field.
///
pub fn remaining_keys(mut required: RequiredFieldSet, elements: &[Element]) -> RequiredFieldSet {
    for element in elements {
        if let Some(key) = element.key_ident() {
            required.remove(key);
        }
    }
    required
}

pub struct LiteralValidator<'a> {
    facts: &'a FactStore,
    filter: &'a TypeFilter,
}

impl<'a> LiteralValidator<'a> {
    pub fn new(facts: &'a FactStore, filter: &'a TypeFilter) -> Self {
        Self { facts, filter }
    }

    ///
    /// Check one literal. Literals of unknown types, of types without required
    /// fields, and of ignored types are skipped.
    ///
    pub fn validate(
        &self,
        provider: &dyn SyntaxProvider,
        expr: &ConstructionExpression<'_>,
    ) -> Option<Violation> {
        let (symbol, required) = match provider.resolve(expr) {
            Resolution::Local(decl) => {
                let required = extract_required_fields(&decl);
                (decl.symbol, Some(required))
            }
            Resolution::External(symbol) => {
                let required = self.facts.import(&symbol);
                (symbol, required)
            }
            Resolution::DotImported(candidates) => {
                let found = candidates.into_iter().find_map(|symbol| {
                    let required = self.facts.import(&symbol)?;
                    Some((symbol, required))
                });
                let Some((symbol, required)) = found else {
                    debug!(position = %expr.position, "no dot import declares the literal's type");
                    return None;
                };
                (symbol, Some(required))
            }
            Resolution::Unresolved => {
                debug!(position = %expr.position, "skipping literal of unresolved type");
                return None;
            }
        };

        let required = required.filter(|set| !set.is_empty())?;
        if self.filter.is_ignored(&symbol) {
            debug!(%symbol, position = %expr.position, "skipping literal of ignored type");
            return None;
        }

        let missing = remaining_keys(required, expr.elements);
        if missing.is_empty() {
            return None;
        }

        Some(Violation {
            type_name: expr.display_name().map(str::to_string),
            missing,
            position: expr.position.clone(),
        })
    }
}
