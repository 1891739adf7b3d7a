//! `authorized_keys` entry descriptor.
use serde::Serialize;

use super::{Descriptor, Ensure, Kind};

/// One public key in an account's `authorized_keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizedKeyResource {
    /// Resource title, `{username}_{key_name}`.
    #[serde(skip)]
    pub title: String,
    /// Name of the key entry in the declaration.
    #[serde(skip)]
    pub key_name: String,
    /// Base64 key body.
    pub key_material: String,
    /// Key algorithm, e.g. `ssh-ed25519`.
    pub key_type: String,
    /// Account that owns the key.
    pub owner: String,
    /// Desired presence.
    pub ensure: Ensure,
}

impl Descriptor for AuthorizedKeyResource {
    fn kind(&self) -> Kind {
        Kind::AuthorizedKey
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ensure(&self) -> Ensure {
        self.ensure
    }
}
