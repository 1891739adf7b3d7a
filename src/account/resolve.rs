//! Parameter resolution: defaulting, group policy, and shape validation.
use super::spec::{AccountSpec, GidParam};
use crate::config::validation::validate_octal_mode;
use crate::error::{AccountError, PolicyConflictError, ValidationError};
use crate::resources::{Ensure, ManageHome};

/// Login shell used when none is declared.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Home directory mode used when none is declared.
pub const DEFAULT_HOME_PERMS: &str = "0750";

/// Mode of the `.ssh` directory; not configurable.
pub const SSH_DIR_MODE: &str = "0700";

/// Primary group used when no dedicated group is created and no gid is given.
pub const FALLBACK_GROUP: &str = "users";

/// Parent of defaulted home directories.
const HOME_ROOT: &str = "/home";

/// What to do when `create_group` is false and no `gid` is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupPolicy {
    /// Use the named shared group.
    Fallback(String),
    /// Reject the declaration with a [`PolicyConflictError`].
    Strict,
}

impl Default for GroupPolicy {
    fn default() -> Self {
        Self::Fallback(FALLBACK_GROUP.to_string())
    }
}

/// The user's primary group after policy resolution.
///
/// The two variants carry the two readings of the declared `gid`: a numeric
/// ID for a group this account creates, or the name of a group that already
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryGroup {
    /// A group named after the user, created alongside it.
    Dedicated {
        /// Group name (the username).
        name: String,
        /// Requested numeric ID.
        gid: Option<u32>,
    },
    /// A group managed elsewhere.
    Existing {
        /// Group name.
        name: String,
    },
}

impl PrimaryGroup {
    /// Name the user's primary group resolves to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Dedicated { name, .. } | Self::Existing { name } => name,
        }
    }
}

/// A validated public key entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    /// Entry name.
    pub name: String,
    /// Base64 key body.
    pub key: String,
    /// Key algorithm.
    pub key_type: String,
}

/// A fully defaulted, internally consistent account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    /// Declaration title.
    pub title: String,
    /// Login name.
    pub username: String,
    /// Numeric user ID.
    pub uid: Option<u32>,
    /// Primary group.
    pub primary_group: PrimaryGroup,
    /// Login shell.
    pub shell: String,
    /// Supplementary groups, first occurrence kept.
    pub groups: Vec<String>,
    /// Home directory.
    pub home_dir: String,
    /// Home directory mode.
    pub home_dir_perms: String,
    /// `.ssh` directory under the home directory.
    pub ssh_dir: String,
    /// Home-directory management directive.
    pub manage_home: ManageHome,
    /// Whether a non-unique uid is allowed.
    pub allowdupe: bool,
    /// Whether unmanaged directory contents are removed.
    pub purge: bool,
    /// Whether the account is a system account.
    pub system: bool,
    /// Public keys in declaration order.
    pub ssh_keys: Vec<ResolvedKey>,
    /// Whether the account should exist.
    pub ensure: Ensure,
    /// GECOS comment.
    pub comment: Option<String>,
    /// Pre-hashed password.
    pub password: Option<String>,
}

impl ResolvedAccount {
    /// Whether a dedicated group is derived for this account.
    #[must_use]
    pub const fn creates_group(&self) -> bool {
        matches!(self.primary_group, PrimaryGroup::Dedicated { .. })
    }
}

/// Resolve a declaration into a complete parameter set.
///
/// Checks shape only: `uid` collisions are left to the convergence engine.
///
/// # Errors
///
/// Returns [`ValidationError`] for empty identifiers, malformed key entries,
/// a relative home directory, an invalid mode, or a non-numeric gid for a
/// dedicated group. Returns [`PolicyConflictError`] when no primary group can
/// be resolved: under [`GroupPolicy::Strict`], or when the fallback group is
/// blank.
pub fn resolve(spec: &AccountSpec, policy: &GroupPolicy) -> Result<ResolvedAccount, AccountError> {
    if spec.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle.into());
    }
    let title = spec.title.clone();

    let username = spec.username.clone().unwrap_or_else(|| title.clone());
    if username.trim().is_empty() {
        return Err(ValidationError::EmptyUsername { title }.into());
    }

    let declared_home = spec
        .home_dir
        .clone()
        .unwrap_or_else(|| format!("{HOME_ROOT}/{username}"));
    if !declared_home.starts_with('/') {
        return Err(ValidationError::RelativeHome {
            title,
            path: declared_home,
        }
        .into());
    }
    let home_dir = normalize_dir(&declared_home);
    let ssh_dir = format!("{}/.ssh", home_dir.trim_end_matches('/'));

    let home_dir_perms = spec
        .home_dir_perms
        .clone()
        .unwrap_or_else(|| DEFAULT_HOME_PERMS.to_string());
    if let Some(reason) = validate_octal_mode(&home_dir_perms) {
        return Err(ValidationError::InvalidMode { title, reason }.into());
    }

    let primary_group = resolve_primary_group(spec, &username, policy)?;
    let ssh_keys = resolve_keys(spec)?;

    let mut groups: Vec<String> = Vec::with_capacity(spec.groups.len());
    for group in &spec.groups {
        if !groups.contains(group) {
            groups.push(group.clone());
        }
    }

    tracing::debug!(
        account = %title,
        username = %username,
        primary_group = primary_group.name(),
        home = %home_dir,
        keys = ssh_keys.len(),
        "resolved account parameters"
    );

    Ok(ResolvedAccount {
        title,
        username,
        uid: spec.uid,
        primary_group,
        shell: spec
            .shell
            .clone()
            .unwrap_or_else(|| DEFAULT_SHELL.to_string()),
        groups,
        home_dir,
        home_dir_perms,
        ssh_dir,
        manage_home: ManageHome::from_param(spec.manage_home),
        allowdupe: spec.allowdupe,
        purge: spec.purge,
        system: spec.system,
        ssh_keys,
        ensure: spec.ensure,
        comment: spec.comment.clone(),
        password: spec.password.clone(),
    })
}

/// Strip trailing slashes, keeping `/` itself.
fn normalize_dir(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// The declared gid, ignoring a blank string.
fn declared_gid(spec: &AccountSpec) -> Option<&GidParam> {
    spec.gid.as_ref().filter(|gid| match gid {
        GidParam::Id(_) => true,
        GidParam::Name(name) => !name.trim().is_empty(),
    })
}

fn resolve_primary_group(
    spec: &AccountSpec,
    username: &str,
    policy: &GroupPolicy,
) -> Result<PrimaryGroup, AccountError> {
    if spec.create_group.unwrap_or(true) {
        let gid = match declared_gid(spec) {
            None => None,
            Some(GidParam::Id(id)) => Some(*id),
            Some(GidParam::Name(name)) => Some(name.trim().parse::<u32>().map_err(|_| {
                ValidationError::NonNumericGid {
                    title: spec.title.clone(),
                    gid: name.clone(),
                }
            })?),
        };
        return Ok(PrimaryGroup::Dedicated {
            name: username.to_string(),
            gid,
        });
    }

    match (declared_gid(spec), policy) {
        (Some(gid), _) => Ok(PrimaryGroup::Existing {
            name: gid.to_string().trim().to_string(),
        }),
        (None, GroupPolicy::Fallback(group)) if !group.trim().is_empty() => {
            Ok(PrimaryGroup::Existing {
                name: group.trim().to_string(),
            })
        }
        (None, _) => Err(PolicyConflictError::NoPrimaryGroup {
            title: spec.title.clone(),
        }
        .into()),
    }
}

fn resolve_keys(spec: &AccountSpec) -> Result<Vec<ResolvedKey>, ValidationError> {
    spec.ssh_keys
        .iter()
        .map(|(name, entry)| -> Result<ResolvedKey, ValidationError> {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyKeyName {
                    title: spec.title.clone(),
                });
            }
            let malformed = |field| ValidationError::MalformedKey {
                title: spec.title.clone(),
                name: name.to_string(),
                field,
            };
            let key = entry
                .key
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| malformed("key"))?;
            let key_type = entry
                .key_type
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| malformed("type"))?;
            Ok(ResolvedKey {
                name: name.to_string(),
                key: key.to_string(),
                key_type: key_type.to_string(),
            })
        })
        .collect()
}
