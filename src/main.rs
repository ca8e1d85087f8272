// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//!
//! uninitialized
//! A standalone checker that reports composite literals leaving out fields
//! tagged `required:"true"`.
//!
//! A front-end materializes each compilation unit as a `*.unit.json` file. The
//! checker loads every unit in a directory, orders them by their imports, and
//! runs the configured checks over them, dependencies first.
//!
//! Exit status is 0 when nothing was reported, 3 when at least one literal was
//! reported, and 1 when the units or the configuration could not be loaded.
//!

#![warn(rust_2018_idioms, unused_lifetimes)]

mod cli;

use ansi_term::Colour::Red;
use anyhow::{Context, Result};
use clap::Parser;
use cli::{CheckArgs, UninitializedCli, UninitializedCommands, UnitArgs};
use std::path::Path;
use std::process::exit;
use std::sync::Once;
use tracing::debug;
use uninitialized_common::SourceUnit;
use uninitialized_lint_config::DEFAULT_CONFIG_FILE;
use uninitialized_lint_impl::reporter::render;
use uninitialized_lint_impl::{CheckRunner, LintConfigurationFactory, Mode, RuleCollection};

/// Exit status when at least one diagnostic was reported
const EXIT_DIAGNOSTICS: i32 = 3;
const EXIT_FAILURE: i32 = 1;

static TRACING_INIT: Once = Once::new();

fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}

fn main() {
    let cli = UninitializedCli::parse();
    init_tracing(cli.verbose);

    let status = match &cli.command {
        UninitializedCommands::Check(args) => run_check(args),
        UninitializedCommands::PrintFacts(args) => run_print_facts(args),
    };

    match status {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", Red.bold().paint("error:"));
            exit(EXIT_FAILURE);
        }
    }
}

fn load_units(args: &UnitArgs) -> Result<Vec<SourceUnit>> {
    let units = SourceUnit::load_all_from_dir(&args.units)
        .context(format!("Failed to load units from: {}", args.units.display()))?;
    debug!(count = units.len(), "loaded units");
    Ok(units)
}

///
/// The explicit configuration if one was given, otherwise the default config
/// file next to the units, otherwise the built-in default rule.
///
fn load_rules(config: Option<&Path>, units_dir: &Path) -> Result<RuleCollection> {
    if let Some(path) = config {
        return LintConfigurationFactory::from_file(path);
    }

    let default_path = units_dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        debug!(path = %default_path.display(), "using default configuration file");
        return LintConfigurationFactory::from_file(&default_path);
    }

    LintConfigurationFactory::default_rules()
}

fn run_check(args: &CheckArgs) -> Result<i32> {
    let units = load_units(&args.unit_args)?;
    let rules = load_rules(args.config.as_deref(), &args.unit_args.units)?;

    let mut runner = CheckRunner::new(Mode::Check, rules);
    if let Some(dir) = &args.facts_dir {
        runner = runner.persist_facts_to(dir);
    }
    let report = runner.run(&units)?;

    let output = render(&report.diagnostics, args.format.into(), !args.no_color)?;
    if !output.is_empty() {
        eprint!("{output}");
        if !output.ends_with('\n') {
            eprintln!();
        }
    }

    debug!(
        units = report.units_checked,
        diagnostics = report.diagnostics.len(),
        "check finished"
    );

    Ok(if report.has_diagnostics() {
        EXIT_DIAGNOSTICS
    } else {
        0
    })
}

fn run_print_facts(args: &UnitArgs) -> Result<i32> {
    let units = load_units(args)?;
    let report =
        CheckRunner::new(Mode::PrintFacts, LintConfigurationFactory::default_rules()?).run(&units)?;

    for fact in &report.facts {
        println!("{fact}");
    }
    Ok(0)
}
