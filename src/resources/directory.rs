//! Directory descriptor.
use serde::Serialize;

use super::{Descriptor, Ensure, Kind};

/// A directory owned by an account (its home or its `.ssh`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryResource {
    /// Resource title (the path).
    #[serde(skip)]
    pub title: String,
    /// Absolute path.
    pub path: String,
    /// Owning user.
    pub owner: String,
    /// Owning group.
    pub group: String,
    /// Octal mode string, e.g. `"0750"`.
    pub mode: String,
    /// Whether the engine may remove unmanaged contents.
    pub force: bool,
    /// Desired presence.
    pub ensure: Ensure,
}

impl DirectoryResource {
    /// Build a directory descriptor titled by its path.
    #[must_use]
    pub fn new(path: &str, owner: &str, group: &str, mode: &str, force: bool, ensure: Ensure) -> Self {
        Self {
            title: path.to_string(),
            path: path.to_string(),
            owner: owner.to_string(),
            group: group.to_string(),
            mode: mode.to_string(),
            force,
            ensure,
        }
    }
}

impl Descriptor for DirectoryResource {
    fn kind(&self) -> Kind {
        Kind::Directory
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ensure(&self) -> Ensure {
        self.ensure
    }
}
