// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Registration with a host that aggregates several linters.
//!
//! A host looks a plugin up by name, hands it whatever settings it was given,
//! and asks for the rules to run along with how much of the program they need
//! to see.

use crate::helpers::rule_collection::RuleCollection;
use crate::lints::configuration_factory::LintConfigurationFactory;
use anyhow::{Context, Result, anyhow, bail};
use std::collections::BTreeMap;
use uninitialized_lint_config::{ConfiguredLint, DEFAULT_LINT_NAME, LintBuilder, UninitializedLint};

/// How much of a program a plugin's rules need loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Syntax trees only
    Syntax,
}

pub trait LinterPlugin: Send + Sync {
    fn build_rules(&self) -> Result<RuleCollection>;

    fn load_mode(&self) -> LoadMode;
}

pub type PluginFactory = fn(Option<&serde_json::Value>) -> Result<Box<dyn LinterPlugin>>;

///
/// The required-fields check as a plugin. Settings, when given, are one
/// lint configuration as JSON; the default is the check under its usual name.
///
pub struct UninitializedPlugin {
    lint: UninitializedLint,
}

impl UninitializedPlugin {
    pub fn from_settings(settings: Option<&serde_json::Value>) -> Result<Box<dyn LinterPlugin>> {
        let lint = match settings {
            None | Some(serde_json::Value::Null) => UninitializedLint::default(),
            Some(value) => serde_json::from_value(value.clone())
                .context("Invalid settings for the uninitialized plugin")?,
        };
        Ok(Box::new(UninitializedPlugin { lint }))
    }
}

impl LinterPlugin for UninitializedPlugin {
    fn build_rules(&self) -> Result<RuleCollection> {
        let mut builder = LintBuilder::new();
        builder.push(ConfiguredLint::Uninitialized(self.lint.clone()));
        LintConfigurationFactory::from_builder(&builder)
    }

    fn load_mode(&self) -> LoadMode {
        LoadMode::Syntax
    }
}

/// Maps plugin names to factories
#[derive(Default)]
pub struct PluginRegistry {
    factories: BTreeMap<String, PluginFactory>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin. A name can only be registered once.
    pub fn register(mut self, name: impl Into<String>, factory: PluginFactory) -> Result<Self> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            bail!("Plugin '{name}' is already registered");
        }
        self.factories.insert(name, factory);
        Ok(self)
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn create(
        &self,
        name: &str,
        settings: Option<&serde_json::Value>,
    ) -> Result<Box<dyn LinterPlugin>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| anyhow!("Unknown plugin '{name}'"))?;
        factory(settings)
    }
}

/// A registry holding every plugin this crate provides
pub fn default_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry
        .factories
        .insert(DEFAULT_LINT_NAME.to_string(), UninitializedPlugin::from_settings);
    registry
}
