// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::check_rule::{CheckRule, Pass};
use crate::reporter::Diagnostic;
use crate::required_fields::extract_required_fields;
use crate::validator::{LiteralValidator, TypeFilter};
use anyhow::Context;
use tracing::debug;
use uninitialized_lint_config::{ConfiguredLint, Severity};

///
/// Flags composite literals that leave out fields tagged `required:"true"`,
/// and exports the required fields of every declared type so that units
/// constructing those types can be checked too.
///
pub struct RequiredFieldsLint {
    name: String,
    severity: Severity,
    filter: TypeFilter,
}

impl RequiredFieldsLint {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> anyhow::Result<Box<dyn CheckRule>> {
        let ConfiguredLint::Uninitialized(lint) = config;

        let filter = TypeFilter::new(&lint.ignore_types)
            .context(format!("Invalid ignore_types pattern in lint '{}'", lint.name))?;

        Ok(Box::new(Self {
            name: lint.name.clone(),
            severity: lint.severity,
            filter,
        }))
    }
}

impl CheckRule for RequiredFieldsLint {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn export_facts(&self, pass: &mut Pass<'_>) {
        for decl in pass.provider.type_declarations() {
            let required = extract_required_fields(&decl);
            pass.facts.export(decl.symbol, required);
        }
    }

    fn check_unit(&self, pass: &mut Pass<'_>) {
        let validator = LiteralValidator::new(pass.facts, &self.filter);
        let violations: Vec<_> = pass
            .provider
            .construction_expressions()
            .iter()
            .filter_map(|expr| validator.validate(pass.provider, expr))
            .collect();

        debug!(
            lint = %self.name,
            unit = pass.provider.unit_path(),
            violations = violations.len(),
            "checked unit"
        );

        for violation in violations {
            pass.report(Diagnostic::from_violation(&self.name, self.severity, violation));
        }
    }
}
