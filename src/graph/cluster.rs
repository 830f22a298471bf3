//! Collapsing dense sibling sets into one summary node

use super::edge::GraphEdge;
use super::node::GraphNode;
use super::snapshot::{ClusterInfo, Subgraph};
use super::types::{GroupTag, NodeId};
use rustc_hash::FxHashSet;

/// Replace the direct children of `parent` in `child_group` with a
/// single summary node `{parent}_cluster`.
///
/// Edges between collapsed children and the rest of the graph are
/// re-pointed at the summary. A missing parent (for example one removed
/// by a filter) or a parent without matching children leaves the graph
/// unchanged.
pub fn cluster(
    graph: Subgraph,
    parent: &NodeId,
    child_group: GroupTag,
    label: &str,
) -> (Subgraph, Option<ClusterInfo>) {
    if !graph.contains(parent) {
        tracing::debug!(parent = %parent, "skipping cluster: parent not in graph");
        return (graph, None);
    }

    let children: FxHashSet<&NodeId> = graph
        .edges
        .iter()
        .filter(|e| e.starts_from(parent))
        .map(|e| &e.to)
        .collect();
    let members: Vec<NodeId> = graph
        .nodes
        .iter()
        .filter(|n| n.group == child_group && &n.id != parent && children.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();

    if members.is_empty() {
        return (graph, None);
    }

    let summary_id = parent.child("cluster");
    let summary = GraphNode::new(summary_id.clone(), label, GroupTag::Summary)
        .with_detail(format!("{} items", members.len()));

    let member_set: FxHashSet<NodeId> = members.iter().cloned().collect();
    let Subgraph { nodes, edges } = graph;

    let mut out_nodes = Vec::with_capacity(nodes.len() + 1 - members.len());
    let mut placed = false;
    for node in nodes {
        if member_set.contains(&node.id) {
            if !placed {
                out_nodes.push(summary.clone());
                placed = true;
            }
        } else {
            out_nodes.push(node);
        }
    }

    let mut out_edges = Vec::with_capacity(edges.len());
    let mut linked = false;
    for mut edge in edges {
        if edge.starts_from(parent) && member_set.contains(&edge.to) {
            if !linked {
                out_edges.push(GraphEdge {
                    from: parent.clone(),
                    to: summary_id.clone(),
                    label: edge.label.take(),
                });
                linked = true;
            }
            continue;
        }
        if member_set.contains(&edge.from) {
            edge.from = summary_id.clone();
        }
        if member_set.contains(&edge.to) {
            edge.to = summary_id.clone();
        }
        if edge.from == summary_id && edge.to == summary_id {
            continue;
        }
        out_edges.push(edge);
    }

    let info = ClusterInfo {
        summary: summary_id,
        parent: parent.clone(),
        members,
    };
    (Subgraph::new(out_nodes, out_edges), Some(info))
}
