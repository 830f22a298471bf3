//! Directed, optionally labeled edges
//!
//! Parallel edges between the same pair of nodes are allowed.

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A directed edge in the company graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node (edge goes FROM this node)
    pub from: NodeId,

    /// Target node (edge goes TO this node)
    pub to: NodeId,

    /// Relationship label (e.g. "has news", "hasMetric")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GraphEdge {
    /// Create a labeled edge
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, label: impl Into<String>) -> Self {
        GraphEdge {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
        }
    }

    /// Create an edge without a label
    pub fn unlabeled(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        GraphEdge {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: &NodeId) -> bool {
        &self.from == node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: &NodeId) -> bool {
        &self.to == node
    }

    /// Check if either endpoint is `node`
    pub fn touches(&self, node: &NodeId) -> bool {
        self.starts_from(node) || self.ends_at(node)
    }
}
