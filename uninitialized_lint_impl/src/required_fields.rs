// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::trace;
use uninitialized_common::{FieldDecl, Symbol, TypeExpr, TypeSpec};

///
/// The keys that must appear in every composite literal of a type. Iteration is
/// in ascending lexicographic order.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredFieldSet(BTreeSet<String>);

impl RequiredFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RequiredFieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RequiredFieldSet(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for RequiredFieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.iter().collect();
        write!(f, "[{}]", keys.join(" "))
    }
}

/// A single field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// An explicitly named field; its key is the name.
    Named { name: String, tag: Option<String> },
    /// An anonymous field; its key is the bare identifier of its type.
    Embedded { ty: TypeExpr, tag: Option<String> },
}

impl FieldSpec {
    ///
    /// The field a declaration contributes. A declaration listing several
    /// names (`A, B int`) is keyed by its first name only.
    ///
    pub fn from_decl(decl: &FieldDecl) -> FieldSpec {
        match decl.names.first() {
            Some(name) => FieldSpec::Named {
                name: name.clone(),
                tag: decl.tag.clone(),
            },
            None => FieldSpec::Embedded {
                ty: decl.ty.clone(),
                tag: decl.tag.clone(),
            },
        }
    }

    ///
    /// The key a literal uses for this field. `None` for an embedded type with
    /// no bare identifier, which therefore can never be required.
    ///
    pub fn key(&self) -> Option<&str> {
        match self {
            FieldSpec::Named { name, .. } => Some(name),
            FieldSpec::Embedded { ty, .. } => ty.bare_ident(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            FieldSpec::Named { tag, .. } | FieldSpec::Embedded { tag, .. } => tag.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Struct(Vec<FieldSpec>),
    /// Any non-aggregate underlying type
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub symbol: Symbol,
    pub shape: TypeShape,
}

impl TypeDeclaration {
    pub fn from_spec(unit: &str, spec: &TypeSpec) -> Self {
        let shape = match &spec.ty {
            TypeExpr::Struct { fields } => {
                TypeShape::Struct(fields.iter().map(FieldSpec::from_decl).collect())
            }
            _ => TypeShape::Opaque,
        };
        TypeDeclaration {
            symbol: Symbol::new(unit, spec.name.clone()),
            shape,
        }
    }

    pub fn name(&self) -> &str {
        &self.symbol.name
    }
}

/// Compute the keys of a declaration whose tag says `required:"true"`.
pub fn extract_required_fields(decl: &TypeDeclaration) -> RequiredFieldSet {
    let TypeShape::Struct(fields) = &decl.shape else {
        return RequiredFieldSet::new();
    };

    let mut required = RequiredFieldSet::new();
    for field in fields {
        let Some(raw_tag) = field.tag() else {
            continue;
        };
        if !tag::is_required(raw_tag) {
            continue;
        }
        match field.key() {
            Some(key) => {
                trace!(ty = %decl.symbol, key, "required field");
                required.insert(key);
            }
            None => trace!(ty = %decl.symbol, ?field, "required field has no usable key"),
        }
    }
    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use uninitialized_common::FieldDecl;

    const REQUIRED: Option<&str> = Some(r#"`required:"true"`"#);

    fn declaration(name: &str, fields: Vec<FieldDecl>) -> TypeDeclaration {
        let spec = TypeSpec {
            name: name.into(),
            ty: TypeExpr::Struct { fields },
            position: None,
        };
        TypeDeclaration::from_spec("example.com/testdata", &spec)
    }

    fn keys(set: &RequiredFieldSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn test_named_and_embedded_fields() {
        let decl = declaration(
            "Foo",
            vec![
                FieldDecl::embedded(TypeExpr::ident("Bar"), REQUIRED),
                FieldDecl::named("NamedBar", TypeExpr::ident("Bar"), REQUIRED),
            ],
        );

        let required = extract_required_fields(&decl);
        assert_eq!(keys(&required), vec!["Bar", "NamedBar"]);
        assert_eq!(required.to_string(), "[Bar NamedBar]");
    }

    #[test]
    fn test_untagged_fields_are_optional() {
        let decl = declaration(
            "OptionalFoo",
            vec![
                FieldDecl::embedded(TypeExpr::ident("Bar"), None),
                FieldDecl::named("NamedBar", TypeExpr::ident("Bar"), None),
                FieldDecl::named("Other", TypeExpr::ident("int"), Some(r#"`json:"other"`"#)),
            ],
        );
        assert!(extract_required_fields(&decl).is_empty());
    }

    #[test]
    fn test_embedded_pointer_and_qualified_types() {
        let decl = declaration(
            "Wrapper",
            vec![
                FieldDecl::embedded(TypeExpr::pointer(TypeExpr::ident("Local")), REQUIRED),
                FieldDecl::embedded(TypeExpr::selector("ext", "Remote"), REQUIRED),
                FieldDecl::embedded(
                    TypeExpr::pointer(TypeExpr::selector("ext", "RemotePtr")),
                    REQUIRED,
                ),
            ],
        );
        assert_eq!(
            keys(&extract_required_fields(&decl)),
            vec!["Local", "Remote", "RemotePtr"]
        );
    }

    #[test]
    fn test_embedded_field_without_identifier_is_skipped() {
        let decl = declaration(
            "Odd",
            vec![FieldDecl::embedded(
                TypeExpr::Other {
                    text: "[]int".into(),
                },
                REQUIRED,
            )],
        );
        assert!(extract_required_fields(&decl).is_empty());
    }

    #[test]
    fn test_pointer_depth_does_not_matter() {
        let decl = declaration(
            "basicTypes",
            vec![
                FieldDecl::embedded(TypeExpr::ident("bool"), REQUIRED),
                FieldDecl::named("namedBool", TypeExpr::ident("bool"), REQUIRED),
                FieldDecl::named("PublicBool", TypeExpr::ident("bool"), REQUIRED),
                FieldDecl::named("namedOptionalBool", TypeExpr::ident("bool"), None),
                FieldDecl::named("OptionalPublicBool", TypeExpr::ident("bool"), None),
                FieldDecl::named("boolP", TypeExpr::pointer(TypeExpr::ident("bool")), REQUIRED),
                FieldDecl::named(
                    "PublicBoolP",
                    TypeExpr::pointer(TypeExpr::ident("bool")),
                    REQUIRED,
                ),
                FieldDecl::named(
                    "DoublePointer",
                    TypeExpr::pointer(TypeExpr::pointer(TypeExpr::ident("bool"))),
                    REQUIRED,
                ),
            ],
        );
        assert_eq!(
            extract_required_fields(&decl).to_string(),
            "[DoublePointer PublicBool PublicBoolP bool boolP namedBool]"
        );
    }

    #[test]
    fn test_multi_name_field_requires_first_name_only() {
        let decl = declaration(
            "Pair",
            vec![FieldDecl {
                names: vec!["Left".into(), "Right".into()],
                ty: TypeExpr::ident("int"),
                tag: REQUIRED.map(str::to_string),
            }],
        );
        assert_eq!(keys(&extract_required_fields(&decl)), vec!["Left"]);
    }

    #[test]
    fn test_malformed_and_false_tags() {
        let decl = declaration(
            "Mixed",
            vec![
                FieldDecl::named("A", TypeExpr::ident("int"), Some(r#"`required:true`"#)),
                FieldDecl::named("B", TypeExpr::ident("int"), Some(r#"`required:"false"`"#)),
                FieldDecl::named("C", TypeExpr::ident("int"), REQUIRED),
            ],
        );
        assert_eq!(keys(&extract_required_fields(&decl)), vec!["C"]);
    }

    #[test]
    fn test_non_struct_declaration_is_empty() {
        let spec = TypeSpec {
            name: "ID".into(),
            ty: TypeExpr::ident("string"),
            position: None,
        };
        let decl = TypeDeclaration::from_spec("example.com/testdata", &spec);
        assert_eq!(decl.shape, TypeShape::Opaque);
        assert!(extract_required_fields(&decl).is_empty());
    }

    #[test]
    fn test_set_operations() {
        let mut set: RequiredFieldSet = ["b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert_eq!(set.to_string(), "[b]");
        assert_eq!(RequiredFieldSet::new().to_string(), "[]");
    }
}
