// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Cross-unit facts.
//!
//! The unit declaring a type exports the type's required fields once; every
//! unit constructing the type imports them later. Imports hand out copies, so
//! readers never share a set they might mutate.

use crate::required_fields::RequiredFieldSet;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use uninitialized_common::Symbol;
use uninitialized_common::unit_context::{FACTS_FILE_SUFFIX, file_stem_for_unit};

/// A fact as exported by its declaring unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedFact {
    pub symbol: Symbol,
    pub required_fields: RequiredFieldSet,
}

impl fmt::Display for ExportedFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.symbol, self.required_fields)
    }
}

#[derive(Debug, Default)]
pub struct FactStore {
    facts: RwLock<HashMap<Symbol, RequiredFieldSet>>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Record the required fields of `symbol`. Empty sets are never stored, and
    /// a symbol keeps the first set exported for it. Returns true when the set
    /// was stored.
    ///
    pub fn export(&self, symbol: Symbol, required: RequiredFieldSet) -> bool {
        if required.is_empty() {
            return false;
        }

        let mut facts = self.facts.write();
        if let Some(existing) = facts.get(&symbol) {
            if *existing == required {
                trace!(%symbol, "fact already exported");
            } else {
                warn!(
                    %symbol,
                    existing = %existing,
                    rejected = %required,
                    "ignoring second export of a fact"
                );
            }
            return false;
        }

        debug!(%symbol, fields = %required, "exporting fact");
        facts.insert(symbol, required);
        true
    }

    /// A private copy of the required fields of `symbol`, if any were exported
    pub fn import(&self, symbol: &Symbol) -> Option<RequiredFieldSet> {
        self.facts.read().get(symbol).cloned()
    }

    pub fn len(&self) -> usize {
        self.facts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.read().is_empty()
    }

    /// Facts exported by one unit, sorted by symbol
    pub fn facts_for(&self, unit: &str) -> Vec<ExportedFact> {
        let mut facts: Vec<ExportedFact> = self
            .facts
            .read()
            .iter()
            .filter(|(symbol, _)| symbol.unit == unit)
            .map(|(symbol, required)| ExportedFact {
                symbol: symbol.clone(),
                required_fields: required.clone(),
            })
            .collect();
        facts.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        facts
    }

    /// Write the facts of one unit to `dir` as JSON
    pub fn save_unit(&self, dir: &Path, unit: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir).context(format!("Failed to create directory: {}", dir.display()))?;

        let file_path = dir.join(format!("{}{}", file_stem_for_unit(unit), FACTS_FILE_SUFFIX));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&file_path)
            .context(format!("Failed to open file for writing: {}", file_path.display()))?;

        serde_json::to_writer_pretty(file, &self.facts_for(unit))
            .context(format!("Failed to serialize facts to: {}", file_path.display()))?;

        Ok(file_path)
    }

    ///
    /// Import every fact file in `dir`, skipping facts of units for which
    /// `skip_unit` returns true. A missing directory holds no facts. Returns the
    /// number of facts stored.
    ///
    pub fn load_dir(&self, dir: &Path, skip_unit: impl Fn(&str) -> bool) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries =
            fs::read_dir(dir).context(format!("Failed to read directory: {}", dir.display()))?;

        // The first file by name wins a conflict
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|f| f.to_str())
                    .is_some_and(|name| name.ends_with(FACTS_FILE_SUFFIX))
            })
            .collect();
        paths.sort();

        let mut stored = 0;
        for path in paths {
            let content = fs::read_to_string(&path)
                .context(format!("Failed to read file: {}", path.display()))?;
            let facts: Vec<ExportedFact> = serde_json::from_str(&content)
                .context(format!("Failed to parse facts from: {}", path.display()))?;

            for fact in facts {
                if skip_unit(&fact.symbol.unit) {
                    continue;
                }
                if self.export(fact.symbol, fact.required_fields) {
                    stored += 1;
                }
            }
        }

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn set(keys: &[&str]) -> RequiredFieldSet {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_export_then_import() {
        let store = FactStore::new();
        let symbol = Symbol::new("example.com/external", "External");

        assert!(store.export(symbol.clone(), set(&["Required"])));
        assert_eq!(store.import(&symbol), Some(set(&["Required"])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_sets_are_not_exported() {
        let store = FactStore::new();
        let symbol = Symbol::new("example.com/a", "Optional");

        assert!(!store.export(symbol.clone(), RequiredFieldSet::new()));
        assert_eq!(store.import(&symbol), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_export_is_write_once() {
        let store = FactStore::new();
        let symbol = Symbol::new("example.com/a", "Foo");

        assert!(store.export(symbol.clone(), set(&["A"])));
        assert!(!store.export(symbol.clone(), set(&["A"])));
        assert!(!store.export(symbol.clone(), set(&["B"])));
        assert_eq!(store.import(&symbol), Some(set(&["A"])));
    }

    #[test]
    fn test_import_returns_a_private_copy() {
        let store = FactStore::new();
        let symbol = Symbol::new("example.com/a", "Foo");
        store.export(symbol.clone(), set(&["A", "B"]));

        let mut working = store.import(&symbol).unwrap();
        working.remove("A");

        assert_eq!(store.import(&symbol), Some(set(&["A", "B"])));
    }

    #[test]
    fn test_unknown_symbol_is_a_miss() {
        let store = FactStore::new();
        assert_eq!(store.import(&Symbol::new("example.com/a", "Nope")), None);
    }

    #[test]
    fn test_concurrent_readers() {
        let store = Arc::new(FactStore::new());
        let symbol = Symbol::new("example.com/a", "Foo");
        store.export(symbol.clone(), set(&["A", "B", "C"]));

        let remaining: Vec<usize> = (0..64)
            .into_par_iter()
            .map(|i| {
                let mut working = store.import(&symbol).unwrap();
                working.remove(["A", "B", "C"][i % 3]);
                working.len()
            })
            .collect();

        assert!(remaining.iter().all(|&len| len == 2));
        assert_eq!(store.import(&symbol).unwrap().len(), 3);
    }

    #[test]
    fn test_facts_for_unit_are_sorted() {
        let store = FactStore::new();
        store.export(Symbol::new("example.com/a", "Zed"), set(&["Z"]));
        store.export(Symbol::new("example.com/a", "Alpha"), set(&["A"]));
        store.export(Symbol::new("example.com/b", "Other"), set(&["O"]));

        let facts = store.facts_for("example.com/a");
        let rendered: Vec<String> = facts.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["example.com/a.Alpha: [A]", "example.com/a.Zed: [Z]"]
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let store = FactStore::new();
        store.export(Symbol::new("example.com/lib", "External"), set(&["Required"]));
        store.export(Symbol::new("example.com/app", "Local"), set(&["X"]));
        store.save_unit(temp_dir.path(), "example.com/lib").unwrap();
        store.save_unit(temp_dir.path(), "example.com/app").unwrap();

        let loaded = FactStore::new();
        let stored = loaded
            .load_dir(temp_dir.path(), |unit| unit == "example.com/app")
            .unwrap();

        assert_eq!(stored, 1);
        assert_eq!(
            loaded.import(&Symbol::new("example.com/lib", "External")),
            Some(set(&["Required"]))
        );
        assert_eq!(loaded.import(&Symbol::new("example.com/app", "Local")), None);
    }

    #[test]
    fn test_units_with_similar_paths_keep_their_own_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let store = FactStore::new();
        store.export(Symbol::new("example.com/a/b", "First"), set(&["X"]));
        store.export(Symbol::new("example.com/a.b", "Second"), set(&["Y"]));
        let first = store.save_unit(temp_dir.path(), "example.com/a/b").unwrap();
        let second = store.save_unit(temp_dir.path(), "example.com/a.b").unwrap();
        assert_ne!(first, second);

        let loaded = FactStore::new();
        assert_eq!(loaded.load_dir(temp_dir.path(), |_| false).unwrap(), 2);
        assert_eq!(
            loaded.import(&Symbol::new("example.com/a/b", "First")),
            Some(set(&["X"]))
        );
        assert_eq!(
            loaded.import(&Symbol::new("example.com/a.b", "Second")),
            Some(set(&["Y"]))
        );
    }

    #[test]
    fn test_conflicting_files_load_in_name_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let symbol = Symbol::new("example.com/a", "Foo");
        for (file, key) in [("b_facts.json", "Late"), ("a_facts.json", "Early")] {
            let facts = vec![ExportedFact {
                symbol: symbol.clone(),
                required_fields: set(&[key]),
            }];
            fs::write(
                temp_dir.path().join(file),
                serde_json::to_string(&facts).unwrap(),
            )
            .unwrap();
        }

        let loaded = FactStore::new();
        assert_eq!(loaded.load_dir(temp_dir.path(), |_| false).unwrap(), 1);
        assert_eq!(loaded.import(&symbol), Some(set(&["Early"])));
    }

    #[test]
    fn test_load_missing_dir() {
        let store = FactStore::new();
        let stored = store
            .load_dir(Path::new("/definitely/not/here"), |_| false)
            .unwrap();
        assert_eq!(stored, 0);
    }
}
