// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::required_fields::TypeDeclaration;
use uninitialized_common::{Element, Position, Symbol, TypeExpr};

/// A composite literal as seen by the validator
#[derive(Debug, Clone, Copy)]
pub struct ConstructionExpression<'a> {
    /// File the literal appears in, used to resolve package qualifiers
    pub file: &'a str,
    pub type_ref: Option<&'a TypeExpr>,
    pub elements: &'a [Element],
    pub position: &'a Position,
}

impl ConstructionExpression<'_> {
    ///
    /// The name used in diagnostics: the identifier, or a selector's trailing
    /// identifier. Other type shapes have no simple name.
    ///
    pub fn display_name(&self) -> Option<&str> {
        match self.type_ref? {
            TypeExpr::Ident { name } | TypeExpr::Selector { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// What a literal's type reference points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A declaration in the unit being checked
    Local(TypeDeclaration),
    /// A type declared by another unit
    External(Symbol),
    /// An unqualified name that may come from any of the file's dot imports.
    /// The first candidate with exported facts is the type.
    DotImported(Vec<Symbol>),
    Unresolved,
}

///
/// The capability a front-end provides to the checker. Implementations hand out
/// declarations and literals of a single compilation unit and resolve type
/// references within it.
///
pub trait SyntaxProvider: Sync {
    /// Import path of the unit
    fn unit_path(&self) -> &str;

    /// Import paths of the units this unit depends on
    fn dependencies(&self) -> Vec<String>;

    fn type_declarations(&self) -> Vec<TypeDeclaration>;

    fn construction_expressions(&self) -> Vec<ConstructionExpression<'_>>;

    fn resolve(&self, expr: &ConstructionExpression<'_>) -> Resolution;
}
