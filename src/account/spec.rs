//! Raw account declarations as written by the caller.
use std::fmt;

use serde::Deserialize;

use super::ordered::Ordered;
use crate::resources::Ensure;

/// A group identifier as declared: a number or a name.
///
/// Whether it names a group or numbers one depends on `create_group`; the
/// resolver decides which reading applies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GidParam {
    /// Numeric form, e.g. `gid = 777`.
    Id(u32),
    /// String form, e.g. `gid = "staff"` or `gid = "777"`.
    Name(String),
}

impl fmt::Display for GidParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A public key entry before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshKeyEntry {
    /// Base64 key body.
    pub key: Option<String>,
    /// Key algorithm, e.g. `ssh-ed25519`.
    #[serde(rename = "type")]
    pub key_type: Option<String>,
}

impl SshKeyEntry {
    /// Build a complete entry.
    #[must_use]
    pub fn new(key_type: &str, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            key_type: Some(key_type.to_string()),
        }
    }
}

/// Named public keys in declaration order.
pub type SshKeys = Ordered<SshKeyEntry>;

/// Desired state of one account, as declared.
///
/// Every field except `title` is optional; the resolver fills in defaults.
/// In a declaration file the title is the table key, so it is not read from
/// the table body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSpec {
    /// Unique identifier of the declaration.
    #[serde(skip)]
    pub title: String,
    /// Login name; defaults to `title`.
    pub username: Option<String>,
    /// Numeric user ID.
    pub uid: Option<u32>,
    /// Group ID (with `create_group`) or primary group name (without).
    pub gid: Option<GidParam>,
    /// Login shell; defaults to `/bin/bash`.
    pub shell: Option<String>,
    /// Supplementary group names.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Home directory; defaults to `/home/{username}`.
    pub home_dir: Option<String>,
    /// Home directory mode; defaults to `0750`.
    pub home_dir_perms: Option<String>,
    /// Whether to create a dedicated group named after the user; defaults to true.
    pub create_group: Option<bool>,
    /// Whether the engine manages the home directory; unset means managed.
    pub manage_home: Option<bool>,
    /// Whether a non-unique uid is allowed.
    #[serde(default)]
    pub allowdupe: bool,
    /// Whether unmanaged contents of the home and `.ssh` directories are removed.
    #[serde(default)]
    pub purge: bool,
    /// Whether the user and group are system accounts.
    #[serde(default)]
    pub system: bool,
    /// Named public keys for `authorized_keys`.
    #[serde(default)]
    pub ssh_keys: SshKeys,
    /// Whether the account should exist.
    #[serde(default)]
    pub ensure: Ensure,
    /// GECOS comment.
    pub comment: Option<String>,
    /// Pre-hashed password.
    pub password: Option<String>,
}

impl AccountSpec {
    /// Create a declaration with every parameter left to its default.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a named public key.
    #[must_use]
    pub fn with_ssh_key(mut self, name: &str, key_type: &str, key: &str) -> Self {
        self.ssh_keys.push(name, SshKeyEntry::new(key_type, key));
        self
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn gid_accepts_number_or_name() {
        let numeric: GidParam = toml::Value::Integer(777).try_into().unwrap();
        assert_eq!(numeric, GidParam::Id(777));
        let named: GidParam = toml::Value::String("staff".to_string()).try_into().unwrap();
        assert_eq!(named, GidParam::Name("staff".to_string()));
    }

    #[test]
    fn gid_display() {
        assert_eq!(GidParam::Id(10).to_string(), "10");
        assert_eq!(GidParam::Name("wheel".to_string()).to_string(), "wheel");
    }

    #[test]
    fn deserialize_minimal_table() {
        let spec: AccountSpec = toml::from_str("").unwrap();
        assert_eq!(spec, AccountSpec::default());
        assert!(!spec.purge);
        assert_eq!(spec.ensure, Ensure::Present);
    }

    #[test]
    fn deserialize_full_table() {
        let spec: AccountSpec = toml::from_str(
            r#"
username = "sysadmin"
uid = 777
gid = "staff"
shell = "/bin/zsh"
groups = ["sudo", "users"]
home_dir = "/opt/admin"
create_group = false
manage_home = false
system = true
ensure = "absent"

[ssh_keys.laptop]
key = "AAAA"
type = "ssh-ed25519"
"#,
        )
        .unwrap();
        assert_eq!(spec.username.as_deref(), Some("sysadmin"));
        assert_eq!(spec.uid, Some(777));
        assert_eq!(spec.gid, Some(GidParam::Name("staff".to_string())));
        assert_eq!(spec.groups, vec!["sudo", "users"]);
        assert_eq!(spec.manage_home, Some(false));
        assert_eq!(spec.ensure, Ensure::Absent);
        assert_eq!(spec.ssh_keys.len(), 1);
    }

    #[test]
    fn deserialize_rejects_unknown_field() {
        let result: Result<AccountSpec, _> = toml::from_str("homedir = \"/x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn key_entry_fields_are_optional_until_resolved() {
        let entry: SshKeyEntry = toml::from_str("key = \"AAAA\"\n").unwrap();
        assert_eq!(entry.key.as_deref(), Some("AAAA"));
        assert!(entry.key_type.is_none());
    }

    #[test]
    fn with_ssh_key_appends_in_order() {
        let spec = AccountSpec::new("a")
            .with_ssh_key("one", "ssh-rsa", "AAA1")
            .with_ssh_key("two", "ssh-rsa", "AAA2");
        let names: Vec<&str> = spec.ssh_keys.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["one", "two"]);
    }
}
