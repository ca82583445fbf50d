//! Bounded-depth reference-cycle detection.

use std::fmt;

use smallvec::SmallVec;
use squint_obj::Obj;

use crate::refs::iter_refs;

/// Default depth budget for [`find_cycles`].
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// One closed loop in the reference graph: the dotted path from the root
/// up to the repeated ancestor, and the remainder of the path that closed
/// back onto it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleEntry {
    pub path_to_ancestor: String,
    pub path_from_ancestor: String,
}

impl fmt::Display for CycleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- .{}", self.path_to_ancestor, self.path_from_ancestor)
    }
}

/// Depth-first search for edges that close a cycle back onto an object on
/// the active path.
///
/// The root enters the path as `_`. A budget of 1 still tests the current
/// node's immediate children for closure but descends no further, so a
/// non-cyclic chain deeper than the budget simply produces no entries.
/// Matching scans the ancestor chain from the root end; entries come out
/// in discovery order, undeduplicated.
#[tracing::instrument(level = "debug", skip(root), fields(id = root.id()))]
pub fn find_cycles(root: &Obj, max_depth: usize) -> Vec<CycleEntry> {
    let mut path = vec!["_".to_string()];
    let mut chain: SmallVec<[usize; 8]> = SmallVec::new();
    let mut found = Vec::new();
    walk(root, max_depth, &mut path, &mut chain, &mut found);
    found
}

fn walk(
    obj: &Obj,
    budget: usize,
    path: &mut Vec<String>,
    chain: &mut SmallVec<[usize; 8]>,
    found: &mut Vec<CycleEntry>,
) {
    chain.push(obj.id());
    for (name, target) in iter_refs(obj) {
        path.push(name);
        if let Some(hit) = chain.iter().position(|&id| id == target.id()) {
            let split = hit + 2;
            found.push(CycleEntry {
                path_to_ancestor: path[..split].join("."),
                path_from_ancestor: path[split..].join("."),
            });
        } else if budget > 1 {
            walk(&target, budget - 1, path, chain, found);
        }
        path.pop();
    }
    chain.pop();
}
