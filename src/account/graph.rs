//! Dependency graph: ordering edges between an account's descriptors.
use std::collections::{BTreeSet, HashMap};

use super::derive::DerivedResources;
use crate::resources::{Descriptor, Edge, Ensure, Resource, ResourceRef, ResourceSet};

/// Attach ordering edges and flatten the descriptors into a [`ResourceSet`].
///
/// The chain is group → user → home → `.ssh` → each key, skipping a missing
/// group. For an absent account every edge is reversed so dependents are
/// removed before the things they depend on.
#[must_use]
pub fn build(derived: DerivedResources) -> ResourceSet {
    let DerivedResources {
        group,
        user,
        home,
        ssh_dir,
        keys,
    } = derived;
    let reverse = user.ensure == Ensure::Absent;

    let mut chain: Vec<ResourceRef> = Vec::with_capacity(4);
    if let Some(g) = &group {
        chain.push(g.reference());
    }
    chain.push(user.reference());
    chain.push(home.reference());
    chain.push(ssh_dir.reference());

    let mut edges: Vec<Edge> = chain
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(link(from, to, reverse)),
            _ => None,
        })
        .collect();
    let ssh_ref = ssh_dir.reference();
    edges.extend(keys.iter().map(|k| link(&ssh_ref, &k.reference(), reverse)));

    let account = user.title.clone();
    let mut resources: Vec<Resource> = Vec::with_capacity(4 + keys.len());
    resources.extend(group.map(Resource::from));
    resources.push(user.into());
    resources.push(home.into());
    resources.push(ssh_dir.into());
    resources.extend(keys.into_iter().map(Resource::from));

    tracing::debug!(
        account = %account,
        resources = resources.len(),
        edges = edges.len(),
        "built dependency graph"
    );
    ResourceSet::new(account, resources, edges)
}

fn link(from: &ResourceRef, to: &ResourceRef, reverse: bool) -> Edge {
    if reverse {
        Edge {
            from: to.clone(),
            to: from.clone(),
        }
    } else {
        Edge {
            from: from.clone(),
            to: to.clone(),
        }
    }
}

/// Indices of `resources` in an order satisfying every edge (Kahn's algorithm).
///
/// Among ready nodes the lowest index goes first. Edges whose endpoints are
/// not in `resources` are ignored. On a cycle the result is shorter than
/// `resources`.
#[must_use]
pub fn topological_order(resources: &[Resource], edges: &[Edge]) -> Vec<usize> {
    let index: HashMap<ResourceRef, usize> = resources
        .iter()
        .enumerate()
        .map(|(i, r)| (r.reference(), i))
        .collect();

    let mut in_degree: Vec<usize> = vec![0; resources.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); resources.len()];
    for edge in edges {
        if let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) {
            if let Some(d) = dependents.get_mut(from) {
                d.push(to);
            }
            if let Some(count) = in_degree.get_mut(to) {
                *count += 1;
            }
        }
    }

    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter_map(|(i, &d)| (d == 0).then_some(i))
        .collect();
    let mut order = Vec::with_capacity(resources.len());

    while let Some(idx) = ready.pop_first() {
        order.push(idx);
        if let Some(next) = dependents.get(idx) {
            for &dep in next {
                if let Some(count) = in_degree.get_mut(dep) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(dep);
                    }
                }
            }
        }
    }

    order
}
