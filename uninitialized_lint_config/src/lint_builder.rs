// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::ConfiguredLint;
use ron::de::from_reader;
use ron::ser::{PrettyConfig, to_writer_pretty};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;

/// File the checker looks for when no configuration path is given
pub const DEFAULT_CONFIG_FILE: &str = "uninitialized.ron";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintBuilder {
    pub lints: Vec<ConfiguredLint>,
}

impl LintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lint: ConfiguredLint) {
        self.lints.push(lint);
    }

    // Method to write the LintBuilder to a file
    pub fn write_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        to_writer_pretty(file, &self.lints, PrettyConfig::default()).map_err(io::Error::other)?;
        Ok(())
    }

    // Method to read the LintBuilder from a file
    pub fn read_from_file<P: AsRef<std::path::Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;

        // Map ron::de::SpannedError to io::Error
        let lints: Vec<ConfiguredLint> = from_reader(file).map_err(io::Error::other)?;

        Ok(LintBuilder { lints })
    }

    /// Parse a RON list of lints
    pub fn from_ron_str(content: &str) -> anyhow::Result<Self> {
        let lints: Vec<ConfiguredLint> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse lint configuration as RON: {e}"))?;
        Ok(LintBuilder { lints })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Severity, UninitializedLintExt};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_to_file() {
        let mut builder = LintBuilder::new();
        builder
            .uninitialized_lint()
            .lint_named("required_fields")
            .with_severity(Severity::Warn)
            .build();

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        builder.write_to_file(temp_path).unwrap();

        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_read_from_file() {
        let mut builder = LintBuilder::new();
        builder
            .uninitialized_lint()
            .lint_named("required_fields")
            .with_severity(Severity::Warn)
            .ignore_type(".*Options$")
            .build();

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        builder.write_to_file(temp_path).unwrap();

        let loaded_builder = LintBuilder::read_from_file(temp_path).unwrap();

        assert_eq!(loaded_builder.lints, builder.lints);
    }

    #[test]
    fn test_from_ron_str_defaults_missing_fields() {
        let content = r#"[
            Uninitialized((
                name: "required_fields",
            )),
        ]"#;

        let builder = LintBuilder::from_ron_str(content).unwrap();
        assert_eq!(builder.lints.len(), 1);
        let ConfiguredLint::Uninitialized(lint) = &builder.lints[0];
        assert_eq!(lint.name, "required_fields");
        assert_eq!(lint.severity, Severity::Error);
        assert!(lint.ignore_types.is_empty());
    }

    #[test]
    fn test_from_ron_str_rejects_garbage() {
        let err = LintBuilder::from_ron_str("not ron at all {").unwrap_err();
        assert!(err.to_string().contains("RON"));
    }
}
