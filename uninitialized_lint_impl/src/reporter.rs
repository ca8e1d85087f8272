// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::required_fields::RequiredFieldSet;
use crate::validator::Violation;
use ansi_term::Color;
use serde::Serialize;
use uninitialized_common::Position;
use uninitialized_lint_config::Severity;

///
/// Build the message for a literal missing `missing`. Keys come out in the
/// set's ascending order; a literal whose type has no simple name gets no prefix.
///
pub fn missing_keys_message(type_name: Option<&str>, missing: &RequiredFieldSet) -> String {
    let keys: Vec<&str> = missing.iter().collect();

    let prefix = type_name.map(|name| format!("{name} ")).unwrap_or_default();
    format!("{prefix}missing required keys: [{}]", keys.join(" "))
}

/// A reported problem, positioned at the literal that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the configured rule that raised it
    pub lint: String,
    pub severity: Severity,
    pub position: Position,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub missing: Vec<String>,
}

impl Diagnostic {
    pub fn from_violation(lint: &str, severity: Severity, violation: Violation) -> Self {
        let message = missing_keys_message(violation.type_name.as_deref(), &violation.missing);
        Diagnostic {
            lint: lint.to_string(),
            severity,
            position: violation.position,
            message,
            type_name: violation.type_name,
            missing: violation.missing.iter().map(str::to_string).collect(),
        }
    }

    /// `file:line:col: message`
    pub fn render_plain(&self) -> String {
        format!("{}: {}", self.position, self.message)
    }

    /// The plain rendering with a coloured severity and rule name in front
    pub fn render_colored(&self) -> String {
        format!(
            "{} [{}] {}: {}",
            self.severity_to_string(),
            self.lint,
            Color::White.bold().paint(self.position.to_string()),
            self.message
        )
    }

    fn severity_to_string(&self) -> String {
        match self.severity {
            Severity::Warn => Color::Yellow.bold().paint("warning").to_string(),
            Severity::Error => Color::Red.bold().paint("error").to_string(),
        }
    }
}

/// Output formats the command line offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

///
/// Render diagnostics in the given format. Text output is one line per
/// diagnostic; JSON output is a single array.
///
pub fn render(diagnostics: &[Diagnostic], format: OutputFormat, color: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => render_json(diagnostics),
        OutputFormat::Text => Ok(diagnostics
            .iter()
            .map(|diagnostic| {
                let line = if color {
                    diagnostic.render_colored()
                } else {
                    diagnostic.render_plain()
                };
                line + "\n"
            })
            .collect()),
    }
}

pub fn render_json(diagnostics: &[Diagnostic]) -> anyhow::Result<String> {
    use anyhow::Context;
    serde_json::to_string_pretty(diagnostics).context("Failed to serialize diagnostics")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn violation(type_name: Option<&str>, missing: &[&str]) -> Violation {
        Violation {
            type_name: type_name.map(str::to_string),
            missing: missing.iter().copied().collect(),
            position: Position::new("testdata.go", 26, 6),
        }
    }

    #[test]
    fn test_message_format() {
        let missing: RequiredFieldSet = ["NamedBar", "Bar"].into_iter().collect();
        assert_eq!(
            missing_keys_message(Some("Foo"), &missing),
            "Foo missing required keys: [Bar NamedBar]"
        );
        assert_eq!(
            missing_keys_message(None, &missing),
            "missing required keys: [Bar NamedBar]"
        );
    }

    #[test]
    fn test_message_sorts_case_sensitively() {
        let missing: RequiredFieldSet = ["namedBool", "bool", "PublicBool", "DoublePointer"]
            .into_iter()
            .collect();
        assert_eq!(
            missing_keys_message(Some("basicTypes"), &missing),
            "basicTypes missing required keys: [DoublePointer PublicBool bool namedBool]"
        );
    }

    #[test]
    fn test_plain_rendering() {
        let diagnostic =
            Diagnostic::from_violation("uninitialized", Severity::Error, violation(Some("Foo"), &["Bar"]));
        assert_eq!(
            diagnostic.render_plain(),
            "testdata.go:26:6: Foo missing required keys: [Bar]"
        );
        assert_eq!(diagnostic.missing, vec!["Bar".to_string()]);
    }

    #[test]
    fn test_colored_rendering_keeps_the_message() {
        let diagnostic =
            Diagnostic::from_violation("strict", Severity::Warn, violation(Some("Foo"), &["Bar"]));
        let rendered = diagnostic.render_colored();
        assert!(rendered.contains("warning"));
        assert!(rendered.contains("[strict]"));
        assert!(rendered.contains("Foo missing required keys: [Bar]"));
    }

    #[test]
    fn test_text_output_has_one_line_per_diagnostic() {
        let diagnostics = vec![
            Diagnostic::from_violation("uninitialized", Severity::Error, violation(Some("Foo"), &["Bar"])),
            Diagnostic::from_violation("uninitialized", Severity::Error, violation(None, &["X"])),
        ];
        let text = render(&diagnostics, OutputFormat::Text, false).unwrap();
        assert_eq!(
            text,
            "testdata.go:26:6: Foo missing required keys: [Bar]\ntestdata.go:26:6: missing required keys: [X]\n"
        );
    }

    #[test]
    fn test_json_output() {
        let diagnostics = vec![Diagnostic::from_violation(
            "uninitialized",
            Severity::Error,
            violation(Some("Foo"), &["Bar", "NamedBar"]),
        )];
        let json = render(&diagnostics, OutputFormat::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["lint"], "uninitialized");
        assert_eq!(value[0]["severity"], "Error");
        assert_eq!(value[0]["position"]["line"], 26);
        assert_eq!(value[0]["type_name"], "Foo");
        assert_eq!(value[0]["missing"][1], "NamedBar");
    }
}
