//! Account declarations and their loading.
pub mod accounts;
pub mod toml_loader;
pub mod validation;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::account::{AccountSpec, GroupPolicy};

/// All loaded account declarations.
#[derive(Debug, Clone)]
pub struct Config {
    /// File the declarations were read from.
    pub path: PathBuf,
    /// Group policy for accounts without a primary group.
    pub policy: GroupPolicy,
    /// Accounts in declaration order.
    pub accounts: Vec<AccountSpec>,
}

impl Config {
    /// Load declarations from `path`.
    ///
    /// A missing file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let declarations = accounts::load(path)
            .with_context(|| format!("loading {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            policy: declarations.policy,
            accounts: declarations.accounts,
        })
    }

    /// Reject accounts without a primary group regardless of `[policy]`.
    #[must_use]
    pub fn with_strict_groups(self) -> Self {
        Self {
            policy: GroupPolicy::Strict,
            ..self
        }
    }

    /// Keep only the accounts whose titles appear in `titles`.
    ///
    /// An empty filter keeps everything.
    #[must_use]
    pub fn filtered(self, titles: &[String]) -> Self {
        if titles.is_empty() {
            return self;
        }
        let accounts = self
            .accounts
            .into_iter()
            .filter(|spec| titles.contains(&spec.title))
            .collect();
        Self { accounts, ..self }
    }

    /// Run all validators and return non-fatal warnings.
    #[must_use]
    pub fn validate(&self) -> Vec<validation::ValidationWarning> {
        validation::validate_all(self)
    }
}
