// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::fact_store::FactStore;
use crate::provider::SyntaxProvider;
use crate::reporter::Diagnostic;

///
/// State handed to a rule while it visits one unit: the unit itself, the
/// shared fact store, and the diagnostics raised so far.
///
pub struct Pass<'a> {
    pub provider: &'a dyn SyntaxProvider,
    pub facts: &'a FactStore,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Pass<'a> {
    pub fn new(provider: &'a dyn SyntaxProvider, facts: &'a FactStore) -> Self {
        Pass {
            provider,
            facts,
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

///
/// One of our configured checks.
///
/// A unit is visited twice. Every rule exports the facts for a unit before
/// any rule checks it, so a unit's own facts are visible while checking it.
/// Units are only visited after all the units they depend on.
///
pub trait CheckRule: Sync + Send {
    ///
    /// Returns the name of the rule. This is the name given in
    /// the configuration, and is attached to every diagnostic.
    ///
    fn name(&self) -> String;

    /// Publish whatever the unit's declarations tell later units.
    fn export_facts(&self, _pass: &mut Pass<'_>) {}

    fn check_unit(&self, pass: &mut Pass<'_>);
}
