//! Company graph model and the post-synthesis stages
//!
//! This module holds the node/edge model plus the stages that run after
//! synthesis:
//! - deduplication by node ID (first write wins)
//! - taxonomy resolution (explicit group or ordered label rules)
//! - company / facet filtering
//! - clustering of dense sibling sets
//! - snapshot finalization (dangling edges pruned)

pub mod cluster;
pub mod dedup;
pub mod edge;
pub mod filter;
pub mod node;
pub mod snapshot;
pub mod style;
pub mod taxonomy;
pub mod types;

// Re-export main types
pub use cluster::cluster;
pub use dedup::dedupe;
pub use edge::GraphEdge;
pub use filter::{filter, CompanySelector, FilterSpec, GroupSelector, SelectorError};
pub use node::{GraphNode, GroupHint, Identified, NodeDraft};
pub use snapshot::{ClusterInfo, GraphDraft, GraphSnapshot, RenderPayload, Subgraph};
pub use style::{group_options, style_for, GroupStyle};
pub use taxonomy::{infer_group, resolve_all, resolve_group, TaxonomyContext};
pub use types::{Facet, GroupTag, NodeId, Ticker, TickerError};
