//! Account derivation pipeline.
//!
//! ```text
//! AccountSpec ─► resolve ─► fan_out (keys) ─► derive ─► graph::build ─► ResourceSet
//! ```
//!
//! Every stage is a pure function of its input: deriving the same
//! declaration twice yields equal resource sets, and a failure at any stage
//! aborts the whole account with no partial output.
pub mod derive;
pub mod graph;
pub mod keys;
mod ordered;
pub mod plan;
pub mod resolve;
pub mod spec;

pub use keys::KeyTitle;
pub use ordered::Ordered;
pub use plan::{Plan, plan_accounts};
pub use resolve::{GroupPolicy, PrimaryGroup, ResolvedAccount};
pub use spec::{AccountSpec, GidParam, SshKeyEntry, SshKeys};

use crate::error::AccountError;
use crate::resources::ResourceSet;

/// Derive the complete, ordered resource set for one account.
///
/// # Errors
///
/// Returns an error if the declaration fails validation or conflicts with
/// `policy`.
///
/// # Examples
///
/// ```
/// use account_cli::account::{AccountSpec, GroupPolicy, plan_account};
///
/// let set = plan_account(&AccountSpec::new("user"), &GroupPolicy::default()).unwrap();
/// assert_eq!(set.len(), 4);
/// assert_eq!(set.user().unwrap().home, "/home/user");
/// ```
pub fn plan_account(spec: &AccountSpec, policy: &GroupPolicy) -> Result<ResourceSet, AccountError> {
    let account = resolve::resolve(spec, policy)?;
    let keys = keys::fan_out(&account)?;
    Ok(graph::build(derive::derive(&account, keys)))
}
