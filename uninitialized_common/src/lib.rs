// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod symbol;
pub mod syntax;
pub mod unit_context;

pub use symbol::Symbol;
pub use syntax::{
    CompositeLit, Element, FieldDecl, ImportSpec, KeyExpr, Position, SourceFile, SourceUnit,
    TypeExpr, TypeSpec,
};
