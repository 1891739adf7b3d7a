//! Group descriptor.
use serde::Serialize;

use super::{Descriptor, Ensure, Kind};

/// A dedicated primary group for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupResource {
    /// Resource title (the account title).
    #[serde(skip)]
    pub title: String,
    /// Group name (the account username).
    pub name: String,
    /// Whether the group is a system group.
    pub system: bool,
    /// Numeric group ID; `None` lets the host allocate one.
    pub gid: Option<u32>,
    /// Desired presence.
    pub ensure: Ensure,
}

impl Descriptor for GroupResource {
    fn kind(&self) -> Kind {
        Kind::Group
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ensure(&self) -> Ensure {
        self.ensure
    }
}
