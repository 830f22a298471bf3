//! Node deduplication by ID
//!
//! First occurrence in traversal order wins. Later duplicates are dropped
//! whole; their fields are never merged into the survivor.

use super::node::Identified;
use rustc_hash::FxHashSet;

/// Remove nodes whose ID was already seen, keeping the first
pub fn dedupe<T: Identified>(nodes: Vec<T>) -> Vec<T> {
    let mut seen = FxHashSet::default();
    let before = nodes.len();
    let unique: Vec<T> = nodes
        .into_iter()
        .filter(|n| seen.insert(n.node_id().clone()))
        .collect();

    if unique.len() < before {
        tracing::debug!(dropped = before - unique.len(), "deduplicated nodes");
    }
    unique
}
