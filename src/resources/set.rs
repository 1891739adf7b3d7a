//! The resource set for one account and its hand-off representation.
use std::fmt;

use serde::Serialize;

use super::{
    AuthorizedKeyResource, Descriptor, DirectoryResource, GroupResource, Kind, Resource,
    UserResource,
};
use crate::account::graph;

/// Reference to a descriptor by kind and title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceRef {
    /// Kind of the referenced descriptor.
    pub kind: Kind,
    /// Title of the referenced descriptor.
    pub title: String,
}

impl ResourceRef {
    /// Create a reference.
    #[must_use]
    pub fn new(kind: Kind, title: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.title)
    }
}

/// A "must-apply-before" constraint: `from` completes before `to` starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Descriptor applied first.
    pub from: ResourceRef,
    /// Descriptor applied afterwards.
    pub to: ResourceRef,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// One entry of the document handed to the convergence engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandoffEntry {
    /// Provider selector.
    pub kind: Kind,
    /// Descriptor title.
    pub title: String,
    /// Desired attributes.
    pub attributes: serde_json::Value,
    /// Descriptors that must be applied after this one.
    pub before: Vec<ResourceRef>,
}

/// The complete, ordered set of descriptors derived for one account.
///
/// Built only by the derivation pipeline; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSet {
    account: String,
    resources: Vec<Resource>,
    edges: Vec<Edge>,
}

impl ResourceSet {
    pub(crate) const fn new(account: String, resources: Vec<Resource>, edges: Vec<Edge>) -> Self {
        Self {
            account,
            resources,
            edges,
        }
    }

    /// Title of the account this set was derived from.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Descriptors in derivation order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Ordering edges.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the set holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Look up a descriptor by kind and title.
    #[must_use]
    pub fn get(&self, kind: Kind, title: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.kind() == kind && r.title() == title)
    }

    /// The group descriptor, when a dedicated group was derived.
    #[must_use]
    pub fn group(&self) -> Option<&GroupResource> {
        self.resources.iter().find_map(|r| match r {
            Resource::Group(g) => Some(g),
            _ => None,
        })
    }

    /// The user descriptor.
    #[must_use]
    pub fn user(&self) -> Option<&UserResource> {
        self.resources.iter().find_map(|r| match r {
            Resource::User(u) => Some(u),
            _ => None,
        })
    }

    /// Directory descriptors (home first, then `.ssh`).
    pub fn directories(&self) -> impl Iterator<Item = &DirectoryResource> {
        self.resources.iter().filter_map(|r| match r {
            Resource::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Authorized-key descriptors in declaration order.
    pub fn authorized_keys(&self) -> impl Iterator<Item = &AuthorizedKeyResource> {
        self.resources.iter().filter_map(|r| match r {
            Resource::AuthorizedKey(k) => Some(k),
            _ => None,
        })
    }

    /// Whether the edge `from -> to` is present.
    #[must_use]
    pub fn has_edge(&self, from: &ResourceRef, to: &ResourceRef) -> bool {
        self.edges.iter().any(|e| &e.from == from && &e.to == to)
    }

    /// Outgoing edge targets of `from`.
    pub fn before<'a>(&'a self, from: &'a ResourceRef) -> impl Iterator<Item = &'a ResourceRef> {
        self.edges
            .iter()
            .filter(move |e| &e.from == from)
            .map(|e| &e.to)
    }

    /// Descriptors in an order that satisfies every edge.
    ///
    /// Ties keep derivation order, so the result is deterministic.
    #[must_use]
    pub fn apply_order(&self) -> Vec<&Resource> {
        graph::topological_order(&self.resources, &self.edges)
            .into_iter()
            .filter_map(|idx| self.resources.get(idx))
            .collect()
    }

    /// Hand-off entries in derivation order, each with its outgoing edges.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptor cannot be represented as JSON.
    pub fn handoff(&self) -> serde_json::Result<Vec<HandoffEntry>> {
        self.resources
            .iter()
            .map(|r| -> serde_json::Result<HandoffEntry> {
                let reference = r.reference();
                Ok(HandoffEntry {
                    kind: r.kind(),
                    title: r.title().to_string(),
                    attributes: r.attributes()?,
                    before: self.before(&reference).cloned().collect(),
                })
            })
            .collect()
    }
}
