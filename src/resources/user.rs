//! User descriptor and home-directory management.
use serde::{Serialize, Serializer};

use super::{Descriptor, Ensure, Kind};

/// Home-directory management directive passed to the user provider.
///
/// Three-valued on purpose: an explicit `false` in a declaration is a
/// directive the engine must honour, not the same thing as leaving the
/// parameter out. The hand-off carries the resolved value: `true` when
/// managed (explicitly or by default) and `"absent"` when management is
/// explicitly turned off.
///
/// # Examples
///
/// ```
/// use account_cli::resources::ManageHome;
///
/// assert_eq!(ManageHome::from_param(None), ManageHome::Unset);
/// assert!(ManageHome::Unset.is_managed());
/// assert!(!ManageHome::from_param(Some(false)).is_managed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManageHome {
    /// Not declared; resolves to managed.
    #[default]
    Unset,
    /// Explicitly managed.
    Managed,
    /// Explicitly not managed.
    Unmanaged,
}

impl ManageHome {
    /// Map an optional declaration flag onto the directive.
    #[must_use]
    pub const fn from_param(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::Managed,
            Some(false) => Self::Unmanaged,
        }
    }

    /// Effective value once the default is applied.
    #[must_use]
    pub const fn is_managed(self) -> bool {
        !matches!(self, Self::Unmanaged)
    }
}

impl Serialize for ManageHome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_managed() {
            serializer.serialize_bool(true)
        } else {
            serializer.serialize_str("absent")
        }
    }
}

/// A POSIX user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResource {
    /// Resource title (the account title).
    #[serde(skip)]
    pub title: String,
    /// Login name.
    pub name: String,
    /// Numeric user ID; `None` lets the host allocate one.
    pub uid: Option<u32>,
    /// Primary group name.
    pub gid: String,
    /// Login shell.
    pub shell: String,
    /// Supplementary groups, in declaration order.
    pub groups: Vec<String>,
    /// Home directory path.
    pub home: String,
    /// Home-directory management directive.
    pub manage_home: ManageHome,
    /// Whether the user is a system account.
    pub system: bool,
    /// Whether a duplicate (non-unique) uid is permitted.
    pub allowdupe: bool,
    /// GECOS comment.
    pub comment: Option<String>,
    /// Pre-hashed password.
    pub password: Option<String>,
    /// Desired presence.
    pub ensure: Ensure,
}

impl Descriptor for UserResource {
    fn kind(&self) -> Kind {
        Kind::User
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ensure(&self) -> Ensure {
        self.ensure
    }
}
