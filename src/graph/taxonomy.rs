//! Group assignment for nodes
//!
//! Synthesizers normally supply a group explicitly. Triple-derived nodes
//! have no typing, so their group is inferred from the label using an
//! ordered rule table. The order matters: the first matching rule wins,
//! so a label such as "Apple 1-Year Return" is `Performance` even when
//! "Apple" is the active company label.

use super::node::{GraphNode, GroupHint, NodeDraft};
use super::types::GroupTag;

/// What a label rule looks for
#[derive(Debug, Clone, Copy)]
enum Marker {
    /// Label contains any of these substrings
    Contains(&'static [&'static str]),
    /// Label equals the active company label
    CompanyLabel,
}

const RULES: &[(Marker, GroupTag)] = &[
    (Marker::Contains(&["Return"]), GroupTag::Performance),
    (Marker::Contains(&["News", "Blog"]), GroupTag::News),
    (Marker::Contains(&["PE", "ROE"]), GroupTag::Financial),
    (Marker::CompanyLabel, GroupTag::Company),
];

/// Context for inference
#[derive(Debug, Clone, Default)]
pub struct TaxonomyContext {
    /// Label of the active company (usually the ticker)
    pub company_label: Option<String>,
}

impl TaxonomyContext {
    pub fn for_company(label: impl Into<String>) -> Self {
        TaxonomyContext {
            company_label: Some(label.into()),
        }
    }
}

/// Infer a group from label text; unmatched labels are `Other`
pub fn infer_group(label: &str, ctx: &TaxonomyContext) -> GroupTag {
    for (marker, group) in RULES {
        let hit = match marker {
            Marker::Contains(needles) => needles.iter().any(|n| label.contains(n)),
            Marker::CompanyLabel => ctx.company_label.as_deref() == Some(label),
        };
        if hit {
            return *group;
        }
    }
    GroupTag::Other
}

/// Resolve a draft's group: explicit wins, otherwise infer
pub fn resolve_group(node: &NodeDraft, ctx: &TaxonomyContext) -> GroupTag {
    match node.hint {
        GroupHint::Explicit(group) => group,
        GroupHint::Infer => infer_group(&node.label, ctx),
    }
}

/// Resolve every draft into a graph node
pub fn resolve_all(drafts: Vec<NodeDraft>, ctx: &TaxonomyContext) -> Vec<GraphNode> {
    drafts
        .into_iter()
        .map(|draft| {
            let group = resolve_group(&draft, ctx);
            draft.resolve(group)
        })
        .collect()
}
