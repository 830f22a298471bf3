//! Fingraph
//!
//! Graph construction and filtering engine for financial and linked-open-data
//! company views. Heterogeneous per-domain JSON payloads (profile,
//! statements, filings, insider activity, news, performance, metrics,
//! statistics, triples) are normalized into typed records and turned into a
//! deterministic node/edge snapshot for a force-directed renderer.
//!
//! # Pipeline
//!
//! ```text
//! raw JSON -> normalize -> synthesize (per company) -> dedupe -> taxonomy
//!          -> [filter] -> [cluster] -> GraphSnapshot
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use fingraph::{BuildOptions, CompanyBundle, DomainKind, Facet, FilterSpec, GraphPipeline};
//! use serde_json::json;
//!
//! let performance = json!({"1-Year Return": 12});
//! let metrics = json!({"PE Ratio": 18});
//! let bundle = CompanyBundle::from_payloads(
//!     "AAPL",
//!     [
//!         (DomainKind::PerformanceOverview, &performance),
//!         (DomainKind::FinancialMetrics, &metrics),
//!     ],
//! );
//!
//! let snapshot = GraphPipeline::build(&[bundle.clone()], &BuildOptions::default());
//! assert_eq!(snapshot.node_count(), 5);
//! assert_eq!(snapshot.edge_count(), 4);
//!
//! // Only the company root survives a News facet filter
//! let news = BuildOptions::default().with_filter(FilterSpec::facet(Facet::News));
//! let snapshot = GraphPipeline::build(&[bundle], &news);
//! assert_eq!(snapshot.node_count(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod pipeline;
pub mod records;
pub mod session;
pub mod synth;

// Re-export main types for convenience
pub use config::{BuildConfig, ConfigError, ConfigResult, SectionCaps};

pub use graph::{
    ClusterInfo, CompanySelector, Facet, FilterSpec, GraphDraft, GraphEdge, GraphNode, GraphSnapshot,
    GroupSelector, GroupTag, NodeDraft, NodeId, RenderPayload, SelectorError, Subgraph, Ticker,
    TickerError,
};

pub use pipeline::{
    load_bundles, parse_bundles, BuildOptions, BundleError, BundleResult, ClusterRule, CompanyBundle,
    GraphPipeline,
};

pub use records::{normalize, CanonicalRecord, DomainKind, NormalizationFailure, NormalizeResult};

pub use session::{GraphSession, RequestTag, Selection};

pub use synth::{
    synthesize, CombinedSynthesizer, EnrichedSynthesizer, FinancialSynthesizer, FinnhubSynthesizer,
    RdfSynthesizer, RdfView, Section, SynthesisMode, Synthesizer,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
