// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::syntax::SourceUnit;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const UNIT_FILE_SUFFIX: &str = ".unit.json";
pub const FACTS_FILE_SUFFIX: &str = "_facts.json";

///
/// Turns a unit import path into something usable as a file stem. ASCII
/// letters, digits and `-` are kept; every other byte becomes `_` plus two hex
/// digits, so distinct paths never share a stem.
/// `example.com/lib` becomes `example_2ecom_2flib`.
///
pub fn file_stem_for_unit(unit_path: &str) -> String {
    let mut stem = String::with_capacity(unit_path.len());
    for byte in unit_path.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02x}"));
        }
    }
    stem
}

impl SourceUnit {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse source unit JSON")
    }

    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context(format!("Failed to read file: {}", path.display()))?;
        Self::from_json(&content).context(format!("Invalid source unit: {}", path.display()))
    }

    /// Serialize this unit into `dir`, named after its import path
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        if self.path.is_empty() {
            return Err(anyhow::anyhow!("Cannot serialize a SourceUnit with an empty path"));
        }

        let dir = dir.as_ref();
        fs::create_dir_all(dir).context(format!("Failed to create directory: {}", dir.display()))?;

        let file_path = dir.join(format!("{}{}", file_stem_for_unit(&self.path), UNIT_FILE_SUFFIX));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&file_path)
            .context(format!("Failed to open file for writing: {}", file_path.display()))?;

        serde_json::to_writer_pretty(file, self)
            .context(format!("Failed to serialize SourceUnit to: {}", file_path.display()))?;

        Ok(file_path)
    }

    ///
    /// Load every `*.unit.json` file in a directory. Units come back sorted by
    /// import path, and two files describing the same unit are an error.
    ///
    pub fn load_all_from_dir(dir_path: &Path) -> Result<Vec<SourceUnit>> {
        if !dir_path.exists() {
            return Err(anyhow::anyhow!("Directory not found: {}", dir_path.display()));
        }

        let entries = fs::read_dir(dir_path)
            .context(format!("Failed to read directory: {}", dir_path.display()))?;

        let mut units = Vec::new();
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            let is_unit_file = path
                .file_name()
                .and_then(|f| f.to_str())
                .is_some_and(|name| name.ends_with(UNIT_FILE_SUFFIX));
            if is_unit_file {
                units.push(Self::read_from_file(&path)?);
            }
        }

        units.sort_by(|a, b| a.path.cmp(&b.path));
        if let Some(pair) = units.windows(2).find(|pair| pair[0].path == pair[1].path) {
            return Err(anyhow::anyhow!(
                "Unit {} is described by more than one file in {}",
                pair[0].path,
                dir_path.display()
            ));
        }

        Ok(units)
    }
}
