//! Graph build pipeline
//!
//! records → synthesize (per company) → dedupe → taxonomy → filter →
//! cluster → snapshot
//!
//! A build never fails: unusable companies are skipped with a warning,
//! absent sections are simply missing from the graph.

use crate::config::{BuildConfig, SectionCaps};
use crate::graph::{
    cluster, dedupe, filter, resolve_all, ClusterInfo, FilterSpec, GraphEdge, GraphNode, GraphSnapshot,
    GroupTag, NodeId, Subgraph, Ticker,
};
use crate::records::{normalize, CanonicalRecord, DomainKind, NormalizationFailure};
use crate::synth::{section_id, Section, SynthesisMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bundle must be an object keyed by ticker")]
    NotAnObject,
}

pub type BundleResult<T> = Result<T, BundleError>;

/// Collapse the `child_group` children of one section in every company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRule {
    pub section: Section,
    pub child_group: GroupTag,
    pub label: String,
}

impl ClusterRule {
    pub fn new(section: Section, child_group: GroupTag, label: impl Into<String>) -> Self {
        Self {
            section,
            child_group,
            label: label.into(),
        }
    }

    /// Parent node this rule targets under `root`
    pub fn parent(&self, root: &NodeId) -> NodeId {
        section_id(root, self.section)
    }
}

/// One company's normalized records
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyBundle {
    /// As supplied; validated at build time
    pub ticker: String,
    pub records: Vec<CanonicalRecord>,
}

impl CompanyBundle {
    pub fn new(ticker: impl Into<String>, records: Vec<CanonicalRecord>) -> Self {
        Self {
            ticker: ticker.into(),
            records,
        }
    }

    /// Normalize raw per-domain payloads, dropping the ones that fail
    pub fn from_payloads<'a, I>(ticker: &str, payloads: I) -> Self
    where
        I: IntoIterator<Item = (DomainKind, &'a Value)>,
    {
        let mut bundle = CompanyBundle::new(ticker, Vec::new());
        let Ok(valid) = Ticker::new(ticker) else {
            return bundle;
        };
        for (kind, raw) in payloads {
            match normalize(kind, &valid, raw) {
                Ok(record) => bundle.records.push(record),
                Err(NormalizationFailure::SourceAbsent { domain, reason }) => {
                    debug!(ticker = %valid, domain = %domain, reason = %reason, "section absent");
                }
                Err(failure) => {
                    debug!(ticker = %valid, error = %failure, "section dropped");
                }
            }
        }
        bundle
    }
}

/// Parse `{TICKER: {wire_key: payload, ..}, ..}`
pub fn parse_bundles(value: &Value) -> BundleResult<Vec<CompanyBundle>> {
    let companies = value.as_object().ok_or(BundleError::NotAnObject)?;
    let mut bundles = Vec::with_capacity(companies.len());
    for (ticker, domains) in companies {
        let Some(domains) = domains.as_object() else {
            warn!(ticker = %ticker, "company entry is not an object, skipping");
            continue;
        };
        let payloads = domains.iter().filter_map(|(key, raw)| match key.parse::<DomainKind>() {
            Ok(kind) => Some((kind, raw)),
            Err(e) => {
                debug!(ticker = %ticker, error = %e, "ignoring payload");
                None
            }
        });
        bundles.push(CompanyBundle::from_payloads(ticker, payloads));
    }
    Ok(bundles)
}

pub fn load_bundles(path: impl AsRef<Path>) -> BundleResult<Vec<CompanyBundle>> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    parse_bundles(&value)
}

/// Everything that shapes one build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    pub mode: SynthesisMode,
    pub caps: SectionCaps,
    pub filter: FilterSpec,
    pub cluster: Vec<ClusterRule>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildConfig::default().into()
    }
}

impl From<BuildConfig> for BuildOptions {
    fn from(config: BuildConfig) -> Self {
        BuildOptions {
            mode: config.mode,
            caps: config.caps,
            filter: FilterSpec::default(),
            cluster: config.cluster,
        }
    }
}

impl BuildOptions {
    pub fn with_mode(mut self, mode: SynthesisMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    pub fn without_clustering(mut self) -> Self {
        self.cluster.clear();
        self
    }
}

pub struct GraphPipeline;

impl GraphPipeline {
    pub fn build(bundles: &[CompanyBundle], options: &BuildOptions) -> GraphSnapshot {
        let synthesizer = options.mode.synthesizer(&options.caps);

        let mut nodes: Vec<GraphNode> = Vec::new();
        let mut edges: Vec<GraphEdge> = Vec::new();
        let mut roots: Vec<NodeId> = Vec::new();

        for bundle in bundles {
            let ticker = match Ticker::new(&bundle.ticker) {
                Ok(ticker) => ticker,
                Err(e) => {
                    warn!(ticker = %bundle.ticker, error = %e, "skipping company");
                    continue;
                }
            };
            let draft = synthesizer.synthesize(&ticker, &bundle.records);
            debug!(
                ticker = %ticker,
                nodes = draft.node_count(),
                edges = draft.edge_count(),
                "synthesized company"
            );

            // Group resolution is node-local, so resolving per company
            // before the global dedupe keeps first-occurrence semantics.
            let context = synthesizer.taxonomy(&ticker);
            nodes.extend(resolve_all(draft.nodes, &context));
            edges.extend(draft.edges);
            roots.push(synthesizer.root_id(&ticker, &bundle.records));
        }

        let graph = Subgraph::new(dedupe(nodes), edges);
        let mut graph = filter(graph, &options.filter);

        let mut clusters: Vec<ClusterInfo> = Vec::new();
        for root in &roots {
            for rule in &options.cluster {
                let (next, info) = cluster(graph, &rule.parent(root), rule.child_group, &rule.label);
                graph = next;
                clusters.extend(info);
            }
        }

        let snapshot = GraphSnapshot::finalize(graph, clusters);
        info!(
            companies = roots.len(),
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            "graph built"
        );
        snapshot
    }
}
