//! Plans covering every declared account.
use std::collections::HashMap;
use std::fmt::Write as _;

use rayon::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::graph::topological_order;
use super::plan_account;
use super::resolve::GroupPolicy;
use super::spec::AccountSpec;
use crate::error::{AccountError, ConfigError};
use crate::resources::{Descriptor, Edge, HandoffEntry, Resource, ResourceRef, ResourceSet};

/// Resource sets for a batch of accounts, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    sets: Vec<ResourceSet>,
}

/// Serialisable form of a [`Plan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDocument {
    /// One entry per account.
    pub accounts: Vec<AccountDocument>,
}

/// Serialisable form of one account's [`ResourceSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountDocument {
    /// Account title.
    pub account: String,
    /// Descriptors with their outgoing edges.
    pub resources: Vec<HandoffEntry>,
}

impl Plan {
    /// Per-account resource sets.
    #[must_use]
    pub fn sets(&self) -> &[ResourceSet] {
        &self.sets
    }

    /// Total number of descriptors across all accounts.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.sets.iter().map(ResourceSet::len).sum()
    }

    /// Build the hand-off document.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptor cannot be represented as JSON.
    pub fn document(&self) -> serde_json::Result<PlanDocument> {
        let accounts = self
            .sets
            .iter()
            .map(|set| -> serde_json::Result<AccountDocument> {
                Ok(AccountDocument {
                    account: set.account().to_string(),
                    resources: set.handoff()?,
                })
            })
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(PlanDocument { accounts })
    }

    /// Lowercase hex SHA-256 of the serialised hand-off document.
    ///
    /// Identical declarations always produce the same digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialised.
    pub fn digest(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(&self.document()?)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let result = hasher.finalize();
        let mut hex = String::with_capacity(64);
        for b in &result {
            // write! to a String is infallible; unwrap_or(()) makes that explicit.
            write!(hex, "{b:02x}").unwrap_or(());
        }
        Ok(hex)
    }
}

/// Derive every account in parallel.
///
/// Accounts are independent, so they are derived concurrently; results keep
/// declaration order and the first failing account (in that order) is
/// reported.
///
/// # Errors
///
/// Returns the first account's [`AccountError`],
/// [`ConfigError::DuplicateResource`] if two accounts derive the same
/// resource, or [`ConfigError::OrderingCycle`] if the merged edges cannot be
/// ordered.
pub fn plan_accounts(specs: &[AccountSpec], policy: &GroupPolicy) -> Result<Plan, AccountError> {
    let results: Vec<Result<ResourceSet, AccountError>> = specs
        .par_iter()
        .map(|spec| plan_account(spec, policy))
        .collect();
    let sets = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    check_unique_resources(&sets)?;
    check_acyclic(&sets)?;
    Ok(Plan { sets })
}

/// Reject a merged plan whose ordering edges contain a cycle.
pub(crate) fn check_acyclic(sets: &[ResourceSet]) -> Result<(), ConfigError> {
    let resources: Vec<Resource> = sets
        .iter()
        .flat_map(|s| s.resources().iter().cloned())
        .collect();
    let edges: Vec<Edge> = sets.iter().flat_map(|s| s.edges().iter().cloned()).collect();
    let ordered = topological_order(&resources, &edges).len();
    if ordered == resources.len() {
        Ok(())
    } else {
        Err(ConfigError::OrderingCycle {
            unordered: resources.len() - ordered,
        })
    }
}

/// Reject resources derived by more than one account.
pub(crate) fn check_unique_resources(sets: &[ResourceSet]) -> Result<(), ConfigError> {
    let mut owners: HashMap<ResourceRef, &str> = HashMap::new();
    for set in sets {
        for resource in set.resources() {
            if let Some(first) = owners.insert(resource.reference(), set.account()) {
                return Err(ConfigError::DuplicateResource {
                    resource: resource.reference().to_string(),
                    first: first.to_string(),
                    second: set.account().to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn plans_keep_declaration_order() {
        let specs: Vec<AccountSpec> = ["zeta", "alpha", "mid"]
            .into_iter()
            .map(AccountSpec::new)
            .collect();
        let plan = plan_accounts(&specs, &GroupPolicy::default()).unwrap();
        let titles: Vec<&str> = plan.sets().iter().map(ResourceSet::account).collect();
        assert_eq!(titles, vec!["zeta", "alpha", "mid"]);
        assert_eq!(plan.resource_count(), 12);
    }

    #[test]
    fn first_failure_in_declaration_order_is_reported() {
        let specs = vec![
            AccountSpec::new("ok"),
            AccountSpec {
                home_dir: Some("relative".to_string()),
                ..AccountSpec::new("bad1")
            },
            AccountSpec::new(""),
        ];
        let err = plan_accounts(&specs, &GroupPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            AccountError::Validation(ValidationError::RelativeHome { .. })
        ));
    }

    #[test]
    fn shared_home_directory_is_rejected() {
        let specs = vec![
            AccountSpec {
                home_dir: Some("/srv/app".to_string()),
                ..AccountSpec::new("app")
            },
            AccountSpec {
                home_dir: Some("/srv/app".to_string()),
                ..AccountSpec::new("app2")
            },
        ];
        let err = plan_accounts(&specs, &GroupPolicy::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: resource directory[/srv/app] is derived by both 'app' and 'app2'"
        );
    }

    #[test]
    fn merged_plan_is_acyclic() {
        let specs = vec![
            AccountSpec::new("a").with_ssh_key("k", "ssh-rsa", "AAAA"),
            AccountSpec {
                ensure: crate::resources::Ensure::Absent,
                ..AccountSpec::new("b")
            },
        ];
        let plan = plan_accounts(&specs, &GroupPolicy::default()).unwrap();
        assert!(check_acyclic(plan.sets()).is_ok());
    }

    #[test]
    fn cyclic_edges_are_rejected() {
        let set = plan_account(&AccountSpec::new("a"), &GroupPolicy::default()).unwrap();
        let mut edges = set.edges().to_vec();
        let back = Edge {
            from: edges[1].to.clone(),
            to: edges[0].from.clone(),
        };
        edges.push(back);
        let cyclic = ResourceSet::new("a".to_string(), set.resources().to_vec(), edges);

        let err = check_acyclic(&[cyclic]).unwrap_err();
        assert!(matches!(err, ConfigError::OrderingCycle { unordered: 4 }));
    }

    #[test]
    fn digest_is_stable_and_input_sensitive() {
        let specs = vec![AccountSpec::new("a").with_ssh_key("k", "ssh-rsa", "AAAA")];
        let first = plan_accounts(&specs, &GroupPolicy::default()).unwrap();
        let second = plan_accounts(&specs, &GroupPolicy::default()).unwrap();
        assert_eq!(first.digest().unwrap(), second.digest().unwrap());
        assert_eq!(first.digest().unwrap().len(), 64);

        let other = vec![AccountSpec::new("a").with_ssh_key("k", "ssh-rsa", "BBBB")];
        let third = plan_accounts(&other, &GroupPolicy::default()).unwrap();
        assert_ne!(first.digest().unwrap(), third.digest().unwrap());
    }

    #[test]
    fn document_lists_resources_per_account() {
        let plan = plan_accounts(&[AccountSpec::new("a")], &GroupPolicy::default()).unwrap();
        let doc = plan.document().unwrap();
        assert_eq!(doc.accounts.len(), 1);
        assert_eq!(doc.accounts[0].account, "a");
        assert_eq!(doc.accounts[0].resources.len(), 4);
    }

    #[test]
    fn empty_plan() {
        let plan = plan_accounts(&[], &GroupPolicy::default()).unwrap();
        assert!(plan.sets().is_empty());
        assert_eq!(plan.resource_count(), 0);
    }
}
