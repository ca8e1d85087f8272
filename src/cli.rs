// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uninitialized_lint_impl::OutputFormat;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct UninitializedCli {
    /// Log what the checker is doing to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: UninitializedCommands,
}

#[derive(Subcommand, Debug)]
pub enum UninitializedCommands {
    /// Report composite literals that leave out required fields
    Check(CheckArgs),

    /// Print the required fields of every type the units declare
    PrintFacts(UnitArgs),
}

#[derive(Args, Debug)]
pub struct UnitArgs {
    /// Directory holding the `*.unit.json` files to load
    #[arg(long)]
    pub units: PathBuf,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub unit_args: UnitArgs,

    /// Lint configuration. Defaults to `uninitialized.ron` in the units directory, if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Load facts of other units from, and save facts of these units to, this directory
    #[arg(long)]
    pub facts_dir: Option<PathBuf>,

    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}
