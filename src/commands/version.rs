//! Command: print version information.
use std::io::Write as _;

use anyhow::Result;

/// Version string: `ACCOUNT_VERSION` from the build, else the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("ACCOUNT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    writeln!(std::io::stdout().lock(), "account {}", version())?;
    Ok(())
}
