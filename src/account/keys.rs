//! SSH key fan-out: one authorized-key descriptor per named key.
use std::collections::HashSet;
use std::fmt;

use super::resolve::ResolvedAccount;
use crate::error::ValidationError;
use crate::resources::AuthorizedKeyResource;

/// Identity of an authorized-key descriptor: `{username}_{key_name}`.
///
/// # Examples
///
/// ```
/// use account_cli::account::KeyTitle;
///
/// let title = KeyTitle::new("deploy", "laptop");
/// assert_eq!(title.to_string(), "deploy_laptop");
/// assert_eq!(title.key_name(), "laptop");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyTitle {
    username: String,
    key_name: String,
}

impl KeyTitle {
    /// Build the identity for `key_name` owned by `username`.
    #[must_use]
    pub fn new(username: &str, key_name: &str) -> Self {
        Self {
            username: username.to_string(),
            key_name: key_name.to_string(),
        }
    }

    /// Key entry name.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }
}

impl fmt::Display for KeyTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.username, self.key_name)
    }
}

/// Expand the account's keys into descriptors, preserving declaration order.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateKey`] if two entries derive the same
/// title.
pub fn fan_out(account: &ResolvedAccount) -> Result<Vec<AuthorizedKeyResource>, ValidationError> {
    let mut seen: HashSet<KeyTitle> = HashSet::with_capacity(account.ssh_keys.len());
    let keys = account
        .ssh_keys
        .iter()
        .map(|key| -> Result<AuthorizedKeyResource, ValidationError> {
            let identity = KeyTitle::new(&account.username, &key.name);
            let title = identity.to_string();
            if !seen.insert(identity) {
                return Err(ValidationError::DuplicateKey {
                    title: account.title.clone(),
                    name: key.name.clone(),
                    resource: title,
                });
            }
            Ok(AuthorizedKeyResource {
                title,
                key_name: key.name.clone(),
                key_material: key.key.clone(),
                key_type: key.key_type.clone(),
                owner: account.username.clone(),
                ensure: account.ensure,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(account = %account.title, count = keys.len(), "fanned out ssh keys");
    Ok(keys)
}
