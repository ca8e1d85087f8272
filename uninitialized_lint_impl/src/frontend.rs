// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::provider::{ConstructionExpression, Resolution, SyntaxProvider};
use crate::required_fields::TypeDeclaration;
use uninitialized_common::{SourceFile, SourceUnit, Symbol, TypeExpr, TypeSpec};

impl SyntaxProvider for SourceUnit {
    fn unit_path(&self) -> &str {
        &self.path
    }

    fn dependencies(&self) -> Vec<String> {
        self.import_paths()
            .into_iter()
            .filter(|path| *path != self.path)
            .map(str::to_string)
            .collect()
    }

    fn type_declarations(&self) -> Vec<TypeDeclaration> {
        self.files
            .iter()
            .flat_map(|file| file.types.iter())
            .map(|spec| TypeDeclaration::from_spec(&self.path, spec))
            .collect()
    }

    fn construction_expressions(&self) -> Vec<ConstructionExpression<'_>> {
        self.files
            .iter()
            .flat_map(|file| {
                file.literals.iter().map(move |literal| ConstructionExpression {
                    file: &file.name,
                    type_ref: literal.ty.as_ref(),
                    elements: &literal.elements,
                    position: &literal.position,
                })
            })
            .collect()
    }

    fn resolve(&self, expr: &ConstructionExpression<'_>) -> Resolution {
        match expr.type_ref {
            Some(TypeExpr::Ident { name }) => {
                if let Some(spec) = local_type(self, name) {
                    return Resolution::Local(TypeDeclaration::from_spec(&self.path, spec));
                }
                let candidates: Vec<Symbol> = source_file(self, expr.file)
                    .map(|file| {
                        file.dot_import_paths()
                            .map(|path| Symbol::new(path, name.clone()))
                            .collect()
                    })
                    .unwrap_or_default();
                if candidates.is_empty() {
                    Resolution::Unresolved
                } else {
                    Resolution::DotImported(candidates)
                }
            }
            Some(TypeExpr::Selector { package, name }) => {
                let import_path =
                    source_file(self, expr.file).and_then(|file| file.import_path_for(package));
                match import_path {
                    Some(path) => Resolution::External(Symbol::new(path, name.clone())),
                    None => Resolution::Unresolved,
                }
            }
            _ => Resolution::Unresolved,
        }
    }
}

fn source_file<'a>(unit: &'a SourceUnit, name: &str) -> Option<&'a SourceFile> {
    unit.files.iter().find(|file| file.name == name)
}

// A type declared anywhere in the unit, whichever file holds it
fn local_type<'a>(unit: &'a SourceUnit, name: &str) -> Option<&'a TypeSpec> {
    unit.files
        .iter()
        .flat_map(|file| file.types.iter())
        .find(|spec| spec.name == name)
}
