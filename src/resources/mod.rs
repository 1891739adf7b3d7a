//! Typed resource descriptors handed to the convergence engine.
//!
//! Each descriptor is an immutable statement of desired OS state. This crate
//! never applies them; the engine selects a provider by [`Kind`], reconciles
//! the attributes idempotently, and honours the ordering [`Edge`]s carried by
//! the enclosing [`ResourceSet`].
pub mod authorized_key;
pub mod directory;
pub mod group;
mod set;
pub mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use authorized_key::AuthorizedKeyResource;
pub use directory::DirectoryResource;
pub use group::GroupResource;
pub use set::{Edge, HandoffEntry, ResourceRef, ResourceSet};
pub use user::{ManageHome, UserResource};

/// Desired presence of a resource.
///
/// # Examples
///
/// ```
/// use account_cli::resources::Ensure;
///
/// assert_eq!(Ensure::default(), Ensure::Present);
/// assert_eq!(Ensure::Absent.to_string(), "absent");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// The resource must exist.
    #[default]
    Present,
    /// The resource must not exist.
    Absent,
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::Absent => f.write_str("absent"),
        }
    }
}

/// Kind tag the convergence engine uses to select a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// A POSIX group.
    Group,
    /// A POSIX user.
    User,
    /// A directory on the host filesystem.
    Directory,
    /// A single `authorized_keys` entry.
    AuthorizedKey,
}

impl Kind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::User => "user",
            Self::Directory => "directory",
            Self::AuthorizedKey => "authorized_key",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity shared by every descriptor.
///
/// Titles are unique per kind within a plan; the engine matches the
/// `(kind, title)` pair against live state to stay idempotent.
pub trait Descriptor {
    /// Kind tag of this descriptor.
    fn kind(&self) -> Kind;

    /// Title identifying this descriptor within its kind.
    fn title(&self) -> &str;

    /// Desired presence.
    fn ensure(&self) -> Ensure;

    /// Reference used by ordering edges.
    fn reference(&self) -> ResourceRef {
        ResourceRef::new(self.kind(), self.title())
    }
}

/// One derived resource, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A group descriptor.
    Group(GroupResource),
    /// A user descriptor.
    User(UserResource),
    /// A directory descriptor.
    Directory(DirectoryResource),
    /// An authorized-key descriptor.
    AuthorizedKey(AuthorizedKeyResource),
}

impl Resource {
    fn as_descriptor(&self) -> &dyn Descriptor {
        match self {
            Self::Group(r) => r,
            Self::User(r) => r,
            Self::Directory(r) => r,
            Self::AuthorizedKey(r) => r,
        }
    }

    /// Attribute mapping of the descriptor, without its title.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be represented as JSON.
    pub fn attributes(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Group(r) => serde_json::to_value(r),
            Self::User(r) => serde_json::to_value(r),
            Self::Directory(r) => serde_json::to_value(r),
            Self::AuthorizedKey(r) => serde_json::to_value(r),
        }
    }
}

impl Descriptor for Resource {
    fn kind(&self) -> Kind {
        self.as_descriptor().kind()
    }

    fn title(&self) -> &str {
        self.as_descriptor().title()
    }

    fn ensure(&self) -> Ensure {
        self.as_descriptor().ensure()
    }
}

impl From<GroupResource> for Resource {
    fn from(r: GroupResource) -> Self {
        Self::Group(r)
    }
}

impl From<UserResource> for Resource {
    fn from(r: UserResource) -> Self {
        Self::User(r)
    }
}

impl From<DirectoryResource> for Resource {
    fn from(r: DirectoryResource) -> Self {
        Self::Directory(r)
    }
}

impl From<AuthorizedKeyResource> for Resource {
    fn from(r: AuthorizedKeyResource) -> Self {
        Self::AuthorizedKey(r)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sample_group() -> GroupResource {
        GroupResource {
            title: "deploy".to_string(),
            name: "deploy".to_string(),
            system: false,
            gid: Some(1200),
            ensure: Ensure::Present,
        }
    }

    #[test]
    fn kind_wire_names() {
        assert_eq!(Kind::Group.as_str(), "group");
        assert_eq!(Kind::User.as_str(), "user");
        assert_eq!(Kind::Directory.as_str(), "directory");
        assert_eq!(Kind::AuthorizedKey.to_string(), "authorized_key");
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&Kind::AuthorizedKey).unwrap();
        assert_eq!(json, "\"authorized_key\"");
    }

    #[test]
    fn resource_delegates_identity() {
        let resource = Resource::from(sample_group());
        assert_eq!(resource.kind(), Kind::Group);
        assert_eq!(resource.title(), "deploy");
        assert_eq!(resource.ensure(), Ensure::Present);
        assert_eq!(resource.reference().to_string(), "group[deploy]");
    }

    #[test]
    fn attributes_omit_title() {
        let attrs = Resource::from(sample_group()).attributes().unwrap();
        assert!(attrs.get("title").is_none());
        assert_eq!(attrs["name"], "deploy");
        assert_eq!(attrs["gid"], 1200);
        assert_eq!(attrs["ensure"], "present");
    }

    #[test]
    fn ensure_deserializes_lowercase() {
        let ensure: Ensure = serde_json::from_str("\"absent\"").unwrap();
        assert_eq!(ensure, Ensure::Absent);
    }
}
