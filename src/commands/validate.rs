//! Command: check declarations without printing a plan.
use anyhow::{Context as _, Result};

use super::{CommandSetup, is_removal, set_summary};
use crate::account::plan::{check_acyclic, check_unique_resources};
use crate::account::plan_account;
use crate::cli::{GlobalOpts, ValidateOpts};
use crate::config::Config;
use crate::logging::{AccountStatus, Log, Logger};
use crate::resources::ResourceSet;

/// Run the validate command.
///
/// Unlike `plan`, every account is checked even after one fails, so all
/// problems are reported in a single run.
///
/// # Errors
///
/// Returns an error if the declarations cannot be loaded, any account is
/// rejected, two accounts derive the same resource, the merged ordering has a
/// cycle, or warnings are present while `--deny-warnings` is set.
pub fn run(global: &GlobalOpts, opts: &ValidateOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    log.stage("Validating accounts");
    let sets = check_accounts(&setup.config, log);

    let failures = log.failure_count();
    if failures == 0 {
        check_unique_resources(&sets).context("checking resources across accounts")?;
        check_acyclic(&sets).context("checking ordering across accounts")?;
    }

    log.print_summary();

    if failures > 0 {
        anyhow::bail!("{failures} account(s) failed validation");
    }
    if opts.deny_warnings && !setup.warnings.is_empty() {
        anyhow::bail!(
            "{} warning(s) treated as errors",
            setup.warnings.len()
        );
    }

    log.info("all declarations are valid");
    Ok(())
}

/// Derive each account independently, recording its outcome on `log`.
///
/// Returns the sets of the accounts that derived successfully.
#[must_use]
pub fn check_accounts(config: &Config, log: &dyn Log) -> Vec<ResourceSet> {
    let mut sets = Vec::with_capacity(config.accounts.len());
    for spec in &config.accounts {
        match plan_account(spec, &config.policy) {
            Ok(set) => {
                let status = if is_removal(&set) {
                    AccountStatus::Removed
                } else {
                    AccountStatus::Planned
                };
                log.record_account(&spec.title, status, Some(set_summary(&set).as_str()));
                sets.push(set);
            }
            Err(e) => {
                let message = e.to_string();
                log.error(&message);
                log.record_account(&spec.title, AccountStatus::Failed, Some(&message));
            }
        }
    }
    sets
}
