//! Node types for the company graph
//!
//! A synthesizer emits [`NodeDraft`]s whose group may still need inference;
//! the taxonomy step turns them into resolved [`GraphNode`]s.

use super::types::{GroupTag, NodeId};
use serde::{Deserialize, Serialize};

/// Anything keyed by a node ID (used by the deduplicator)
pub trait Identified {
    fn node_id(&self) -> &NodeId;
}

/// How a draft node gets its group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupHint {
    /// Supplied by the synthesizer; authoritative
    Explicit(GroupTag),
    /// Inferred from the label by the taxonomy rule table
    Infer,
}

/// A node as emitted by a synthesizer, before taxonomy resolution
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDraft {
    pub id: NodeId,
    pub label: String,
    pub hint: GroupHint,
    pub detail: Option<String>,
}

impl NodeDraft {
    /// Create a draft with an explicit group
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, group: GroupTag) -> Self {
        NodeDraft {
            id: id.into(),
            label: label.into(),
            hint: GroupHint::Explicit(group),
            detail: None,
        }
    }

    /// Create a draft whose group is inferred from its label
    pub fn inferred(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        NodeDraft {
            id: id.into(),
            label: label.into(),
            hint: GroupHint::Infer,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn resolve(self, group: GroupTag) -> GraphNode {
        GraphNode {
            id: self.id,
            label: self.label,
            group,
            detail: self.detail,
        }
    }
}

impl Identified for NodeDraft {
    fn node_id(&self) -> &NodeId {
        &self.id
    }
}

/// A node in a finalized graph
///
/// `detail` is long-form inspection text; it plays no part in identity or
/// grouping. It serializes as `title`, the tooltip field renderers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub group: GroupTag,
    #[serde(rename = "title", default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GraphNode {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, group: GroupTag) -> Self {
        GraphNode {
            id: id.into(),
            label: label.into(),
            group,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl Identified for GraphNode {
    fn node_id(&self) -> &NodeId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_resolution_keeps_fields() {
        let draft = NodeDraft::inferred("x_1", "1-Year Return").with_detail("12%");
        assert_eq!(draft.hint, GroupHint::Infer);

        let node = draft.resolve(GroupTag::Performance);
        assert_eq!(node.id, "x_1");
        assert_eq!(node.group, GroupTag::Performance);
        assert_eq!(node.detail.as_deref(), Some("12%"));
    }

    #[test]
    fn test_node_serializes_detail_as_title() {
        let node = GraphNode::new("AAPL", "Apple", GroupTag::Company).with_detail("Company: Apple");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["title"], "Company: Apple");
        assert_eq!(json["group"], "Company");

        let bare = serde_json::to_value(GraphNode::new("AAPL", "Apple", GroupTag::Company)).unwrap();
        assert!(bare.get("title").is_none());
    }
}
