//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI entry point for declarative account provisioning.
#[derive(Parser, Debug)]
#[command(
    name = "account",
    about = "Derive ordered provisioning resources from account declarations",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Declaration file (default: $ACCOUNT_CONFIG, then accounts.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reject accounts that neither create nor name a primary group
    #[arg(long, global = true)]
    pub strict_groups: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive and print the resource plan
    Plan(PlanOpts),
    /// Check declarations without printing a plan
    Validate(ValidateOpts),
    /// Print version information
    Version,
}

/// Output format for `plan`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Hand-off document as pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable listing in apply order.
    Text,
}

/// Options for the `plan` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PlanOpts {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Plan only these accounts
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `validate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ValidateOpts {
    /// Treat warnings as errors
    #[arg(long)]
    pub deny_warnings: bool,
}
