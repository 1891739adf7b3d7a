//! Account declaration loading.
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::account::resolve::FALLBACK_GROUP;
use crate::account::{AccountSpec, GroupPolicy, Ordered};
use crate::error::ConfigError;

/// Handling of accounts that neither create a group nor name one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MissingGroup {
    /// Use `fallback_group`.
    #[default]
    Fallback,
    /// Reject the account.
    Error,
}

/// `[policy]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicySection {
    #[serde(default)]
    missing_group: MissingGroup,
    fallback_group: Option<String>,
}

impl PolicySection {
    fn into_policy(self) -> GroupPolicy {
        match self.missing_group {
            MissingGroup::Fallback => GroupPolicy::Fallback(
                self.fallback_group
                    .unwrap_or_else(|| FALLBACK_GROUP.to_string()),
            ),
            MissingGroup::Error => GroupPolicy::Strict,
        }
    }
}

/// Root of `accounts.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AccountsFile {
    #[serde(default)]
    policy: PolicySection,
    #[serde(default)]
    accounts: Ordered<AccountSpec>,
}

/// Declarations read from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Group policy from `[policy]`.
    pub policy: GroupPolicy,
    /// Accounts in document order, titled by their table keys.
    pub accounts: Vec<AccountSpec>,
}

impl From<AccountsFile> for Declarations {
    fn from(file: AccountsFile) -> Self {
        let accounts = file
            .accounts
            .into_entries()
            .into_iter()
            .map(|(title, spec)| AccountSpec { title, ..spec })
            .collect();
        Self {
            policy: file.policy.into_policy(),
            accounts,
        }
    }
}

/// Load account declarations from a TOML file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Declarations, ConfigError> {
    let file: AccountsFile = toml_loader::load_config(path)?;
    Ok(file.into())
}
