// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::check_rule::Pass;
use crate::fact_store::{ExportedFact, FactStore};
use crate::helpers::rule_collection::RuleCollection;
use crate::helpers::unit_graph::dependency_waves;
use crate::provider::SyntaxProvider;
use crate::reporter::Diagnostic;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

///
/// The mode our check runner should operate in
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Export facts and check every literal
    Check,

    /// Export facts only
    PrintFacts,
}

/// Everything a run produced, in a deterministic order
#[derive(Debug, Default)]
pub struct RunReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Facts exported by the units of this run
    pub facts: Vec<ExportedFact>,
    pub units_checked: usize,
}

impl RunReport {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

// What a single unit contributed to the report
struct UnitOutcome {
    diagnostics: Vec<Diagnostic>,
    facts: Vec<ExportedFact>,
}

///
/// Runs checks over a set of units, dependencies first.
///
pub struct CheckRunner {
    mode: Mode,
    rules: Arc<RuleCollection>,
    facts: Arc<FactStore>,

    // When set, facts of units outside the run are loaded from here before
    // the run, and facts of every checked unit are written back after it.
    facts_dir: Option<PathBuf>,
}

impl CheckRunner {
    pub fn new(mode: Mode, rules: RuleCollection) -> Self {
        CheckRunner {
            mode,
            rules: Arc::new(rules),
            facts: Arc::new(FactStore::new()),
            facts_dir: None,
        }
    }

    /// Share a fact store with other runners
    pub fn with_fact_store(mut self, facts: Arc<FactStore>) -> Self {
        self.facts = facts;
        self
    }

    pub fn persist_facts_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.facts_dir = Some(dir.into());
        self
    }

    pub fn fact_store(&self) -> &Arc<FactStore> {
        &self.facts
    }

    pub fn run<P: SyntaxProvider>(&self, units: &[P]) -> Result<RunReport> {
        let waves = dependency_waves(units)?;

        if let Some(dir) = &self.facts_dir {
            let in_run: HashSet<&str> = units.iter().map(|unit| unit.unit_path()).collect();
            let loaded = self
                .facts
                .load_dir(dir, |unit| in_run.contains(unit))
                .context(format!("Failed to load facts from: {}", dir.display()))?;
            debug!(loaded, dir = %dir.display(), "loaded persisted facts");
        }

        let mut report = RunReport::default();
        for (depth, wave) in waves.iter().enumerate() {
            debug!(wave = depth, units = wave.len(), "running wave");

            // Collecting a parallel iterator keeps the input order
            let outcomes: Vec<UnitOutcome> = wave
                .par_iter()
                .map(|&index| self.run_unit(&units[index]))
                .collect();

            for outcome in outcomes {
                report.diagnostics.extend(outcome.diagnostics);
                report.facts.extend(outcome.facts);
                report.units_checked += 1;
            }
        }

        if let Some(dir) = &self.facts_dir {
            for unit in units {
                self.facts.save_unit(dir, unit.unit_path())?;
            }
        }

        Ok(report)
    }

    fn run_unit(&self, unit: &dyn SyntaxProvider) -> UnitOutcome {
        let mut pass = Pass::new(unit, &self.facts);

        // Every rule exports before any rule checks
        for rule in self.rules.rules() {
            rule.export_facts(&mut pass);
        }
        if self.mode == Mode::Check {
            for rule in self.rules.rules() {
                rule.check_unit(&mut pass);
            }
        }

        let mut diagnostics = pass.into_diagnostics();
        diagnostics.sort_by(|a, b| a.position.cmp(&b.position));

        info!(
            unit = unit.unit_path(),
            diagnostics = diagnostics.len(),
            "finished unit"
        );

        UnitOutcome {
            diagnostics,
            facts: self.facts.facts_for(unit.unit_path()),
        }
    }
}
