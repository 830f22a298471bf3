//! Graph accumulators and the finalized snapshot
//!
//! A build works on a private [`GraphDraft`], then a [`Subgraph`] of
//! resolved nodes, and ends with an immutable [`GraphSnapshot`]. The
//! snapshot is what the rendering collaborator receives.

use super::edge::GraphEdge;
use super::node::{GraphNode, NodeDraft};
use super::style::{group_options, GroupOptions};
use super::types::{GroupTag, NodeId};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Synthesizer output: nodes whose group may still be inferred
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphDraft {
    pub nodes: Vec<NodeDraft>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a node and return its ID for linking
    pub fn add_node(&mut self, node: NodeDraft) -> NodeId {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    pub fn link(&mut self, from: &NodeId, to: &NodeId, label: impl Into<String>) {
        self.edges.push(GraphEdge::new(from.clone(), to.clone(), label));
    }

    pub fn link_unlabeled(&mut self, from: &NodeId, to: &NodeId) {
        self.edges.push(GraphEdge::unlabeled(from.clone(), to.clone()));
    }

    /// Append another draft, preserving order
    pub fn extend(&mut self, other: GraphDraft) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Resolved nodes plus edges, not yet checked for dangling references
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subgraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Subgraph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Subgraph { nodes, edges }
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }
}

/// One collapsed group of siblings, kept so the renderer can expand it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterInfo {
    pub summary: NodeId,
    pub parent: NodeId,
    pub members: Vec<NodeId>,
}

/// Immutable result of one graph build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    clusters: Vec<ClusterInfo>,
}

impl GraphSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Freeze a subgraph, dropping every edge with a missing endpoint
    pub fn finalize(graph: Subgraph, clusters: Vec<ClusterInfo>) -> Self {
        let Subgraph { nodes, edges } = graph;
        let known: FxHashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();

        let total = edges.len();
        let edges: Vec<GraphEdge> = edges
            .into_iter()
            .filter(|e| known.contains(&e.from) && known.contains(&e.to))
            .collect();
        if edges.len() < total {
            tracing::debug!(pruned = total - edges.len(), "dropped dangling edges");
        }

        let clusters = clusters
            .into_iter()
            .filter(|c| known.contains(&c.summary))
            .collect();

        GraphSnapshot { nodes, edges, clusters }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn clusters(&self) -> &[ClusterInfo] {
        &self.clusters
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_in_group(&self, group: GroupTag) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.group == group).collect()
    }

    pub fn outgoing(&self, id: &str) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| e.from == id).collect()
    }

    /// Count nodes per group, in first-seen order
    pub fn group_counts(&self) -> IndexMap<GroupTag, usize> {
        let mut counts = IndexMap::new();
        for node in &self.nodes {
            *counts.entry(node.group).or_insert(0) += 1;
        }
        counts
    }

    /// Payload in the shape a force-directed renderer consumes
    pub fn render_payload(&self) -> RenderPayload<'_> {
        RenderPayload {
            nodes: &self.nodes,
            edges: &self.edges,
            clusters: &self.clusters,
            groups: group_options(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.render_payload())
    }
}

/// Snapshot plus group styling, borrowed for serialization
#[derive(Debug, Serialize)]
pub struct RenderPayload<'a> {
    pub nodes: &'a [GraphNode],
    pub edges: &'a [GraphEdge],
    #[serde(skip_serializing_if = "<[ClusterInfo]>::is_empty")]
    pub clusters: &'a [ClusterInfo],
    pub groups: IndexMap<&'static str, GroupOptions>,
}
