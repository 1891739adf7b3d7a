//! `account` binary: loads declarations and prints derived resource plans.
use account_cli::{cli, commands, logging};
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    match args.command {
        cli::Command::Plan(opts) => commands::plan::run(&args.global, &opts, &log),
        cli::Command::Validate(opts) => commands::validate::run(&args.global, &opts, &log),
        cli::Command::Version => commands::version::run(),
    }
}
