// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod helpers;

mod check_rule;
mod fact_store;
mod frontend;
pub mod lints;
pub mod plugin;
mod provider;
pub mod reporter;
mod required_fields;
pub mod tag;
mod validator;

// Re-export our public API
pub use check_rule::{CheckRule, Pass};
pub use fact_store::{ExportedFact, FactStore};
pub use helpers::check_runner::{CheckRunner, Mode, RunReport};
pub use helpers::rule_collection::RuleCollection;
pub use helpers::unit_graph::dependency_waves;
pub use lints::configuration_factory::LintConfigurationFactory;
pub use plugin::{LinterPlugin, LoadMode, PluginRegistry, UninitializedPlugin, default_registry};
pub use provider::{ConstructionExpression, Resolution, SyntaxProvider};
pub use reporter::{Diagnostic, OutputFormat, missing_keys_message};
pub use required_fields::{
    FieldSpec, RequiredFieldSet, TypeDeclaration, TypeShape, extract_required_fields,
};
pub use validator::{LiteralValidator, TypeFilter, Violation, remaining_keys};
