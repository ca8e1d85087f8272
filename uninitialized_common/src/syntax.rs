// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! The materialized output of a front-end: one [`SourceUnit`] per compilation
//! unit, holding the type declarations and composite literals of its files.
//!
//! Nothing in here parses source text. A front-end walks its own syntax trees
//! and serializes what the checker needs into this shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Start of a syntax node in its source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A type expression as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A bare identifier, `Foo`
    Ident { name: String },
    /// A package-qualified identifier, `pkg.Foo`
    Selector { package: String, name: String },
    /// `*T`
    Pointer { elem: Box<TypeExpr> },
    /// `struct { ... }`
    Struct { fields: Vec<FieldDecl> },
    /// Anything else (slices, maps, channels, generic instantiations, ...),
    /// kept as text for messages only.
    Other { text: String },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident { name: name.into() }
    }

    pub fn selector(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Selector {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer {
            elem: Box::new(elem),
        }
    }

    ///
    /// The bare identifier naming this type, with any number of pointer
    /// indirections and the package qualifier stripped. `**pkg.Foo` yields `Foo`.
    /// Struct literals and other composite shapes have no bare identifier.
    ///
    pub fn bare_ident(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident { name } => Some(name),
            TypeExpr::Selector { name, .. } => Some(name),
            TypeExpr::Pointer { elem } => elem.bare_ident(),
            TypeExpr::Struct { .. } | TypeExpr::Other { .. } => None,
        }
    }
}

/// One line of a struct body. No names means an embedded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default)]
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Raw tag literal including its delimiters, e.g. `` `required:"true"` ``
    #[serde(default)]
    pub tag: Option<String>,
}

impl FieldDecl {
    pub fn named(name: impl Into<String>, ty: TypeExpr, tag: Option<&str>) -> Self {
        Self {
            names: vec![name.into()],
            ty,
            tag: tag.map(str::to_string),
        }
    }

    pub fn embedded(ty: TypeExpr, tag: Option<&str>) -> Self {
        Self {
            names: Vec::new(),
            ty,
            tag: tag.map(str::to_string),
        }
    }
}

/// `type Name <ty>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    pub ty: TypeExpr,
    #[serde(default)]
    pub position: Option<Position>,
}

/// Key of a keyed element in a composite literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyExpr {
    Ident { name: String },
    /// Map keys, array indices and other non-identifier keys
    Other { text: String },
}

/// One element of a composite literal. Element values are not modelled; only
/// their keys take part in the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Keyed { key: KeyExpr },
    Positional,
}

impl Element {
    pub fn keyed(name: impl Into<String>) -> Self {
        Element::Keyed {
            key: KeyExpr::Ident { name: name.into() },
        }
    }

    /// The identifier key of this element, if it has one.
    pub fn key_ident(&self) -> Option<&str> {
        match self {
            Element::Keyed {
                key: KeyExpr::Ident { name },
            } => Some(name),
            _ => None,
        }
    }
}

/// `T{...}`. The type is absent when elided inside an enclosing literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeLit {
    #[serde(default)]
    pub ty: Option<TypeExpr>,
    #[serde(default)]
    pub elements: Vec<Element>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    pub path: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl ImportSpec {
    ///
    /// The name this import is referred to by inside the file. Blank (`_`) and
    /// dot (`.`) imports cannot appear as a selector qualifier and have none.
    ///
    pub fn local_name(&self) -> Option<&str> {
        match self.alias.as_deref() {
            Some("_") | Some(".") => None,
            Some(alias) => Some(alias),
            None => self.path.rsplit('/').next().filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub literals: Vec<CompositeLit>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            types: Vec::new(),
            literals: Vec::new(),
        }
    }

    /// Import path bound to `qualifier` in this file
    pub fn import_path_for(&self, qualifier: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|import| import.local_name() == Some(qualifier))
            .map(|import| import.path.as_str())
    }

    /// Paths imported with `.`, in declaration order
    pub fn dot_import_paths(&self) -> impl Iterator<Item = &str> {
        self.imports
            .iter()
            .filter(|import| import.alias.as_deref() == Some("."))
            .map(|import| import.path.as_str())
    }
}

/// A compilation unit, identified by its import path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub path: String,
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            files: Vec::new(),
        }
    }

    /// Every import path referenced by any file of the unit
    pub fn import_paths(&self) -> BTreeSet<&str> {
        self.files
            .iter()
            .flat_map(|file| file.imports.iter().map(|import| import.path.as_str()))
            .collect()
    }
}
