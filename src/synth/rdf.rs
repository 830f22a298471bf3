//! Triple-service graphs
//!
//! The triple service already answers in near-graph shape, so this mode
//! re-labels and re-groups upstream nodes instead of deriving structure.
//! The detailed view keeps every node and lets the taxonomy rules group
//! them; the simplified view keeps only metrics, performance overviews and
//! news articles, hung off three shared summary nodes.

use super::{RdfView, Synthesizer};
use crate::graph::{GraphDraft, GroupTag, NodeDraft, NodeId, Ticker};
use crate::records::{CanonicalRecord, RdfGraphRecord, RdfNode};
use rustc_hash::FxHashSet;

const METRIC_MARKERS: [&str; 5] = ["FinancialMetric", "Debt", "Market_Cap", "P/E", "Revenue"];
const PERFORMANCE_MARKER: &str = "PerformanceOverview";
const NEWS_MARKER: &str = "NewsArticle";

/// A shared summary node in the simplified view
struct Summary {
    id: &'static str,
    label: &'static str,
    root_edge: &'static str,
    member_edge: &'static str,
}

const METRICS: Summary = Summary {
    id: "financial-metrics",
    label: "Financial Metrics",
    root_edge: "hasMetrics",
    member_edge: "hasMetric",
};

const PERFORMANCE: Summary = Summary {
    id: "performance",
    label: "Performance Overview",
    root_edge: "hasPerformance",
    member_edge: "includes",
};

const NEWS: Summary = Summary {
    id: "news",
    label: "News Articles",
    root_edge: "hasNews",
    member_edge: "mentions",
};

#[derive(Debug, Clone, Default)]
pub struct RdfSynthesizer {
    view: RdfView,
}

impl RdfSynthesizer {
    pub fn new(view: RdfView) -> Self {
        Self { view }
    }

    pub fn view(&self) -> RdfView {
        self.view
    }
}

impl Synthesizer for RdfSynthesizer {
    fn synthesize(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> GraphDraft {
        let record = graph_record(ticker, records);
        let mut draft = GraphDraft::new();

        let root = match record.and_then(|r| company_node(r, ticker)) {
            Some(node) => draft.add_node(
                NodeDraft::new(node.id.as_str(), node.label.as_str(), GroupTag::Company)
                    .with_detail(format!("Details: {}", node.label)),
            ),
            None => {
                tracing::debug!(ticker = %ticker, "no upstream company node, using ticker root");
                draft.add_node(
                    NodeDraft::new(ticker.root_id(), ticker.as_str(), GroupTag::Company)
                        .with_detail(format!("Company: {}", ticker)),
                )
            }
        };

        if let Some(record) = record {
            match self.view {
                RdfView::Detailed => detailed(record, &mut draft),
                RdfView::Simplified => simplified(record, &root, &mut draft),
            }
        }
        draft
    }

    fn root_id(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> NodeId {
        graph_record(ticker, records)
            .and_then(|r| company_node(r, ticker))
            .map(|node| NodeId::new(node.id.as_str()))
            .unwrap_or_else(|| ticker.root_id())
    }
}

fn graph_record<'a>(ticker: &Ticker, records: &'a [CanonicalRecord]) -> Option<&'a RdfGraphRecord> {
    records.iter().find_map(|r| match r {
        CanonicalRecord::RdfGraph(g) if &g.ticker == ticker => Some(g),
        _ => None,
    })
}

/// Upstream node whose label is the ticker itself
fn company_node<'a>(record: &'a RdfGraphRecord, ticker: &Ticker) -> Option<&'a RdfNode> {
    record.nodes.iter().find(|n| n.label == ticker.as_str())
}

/// Every upstream node once, grouped by label inference; every upstream edge
fn detailed(record: &RdfGraphRecord, draft: &mut GraphDraft) {
    let mut seen: FxHashSet<String> = draft.nodes.iter().map(|n| n.id.to_string()).collect();
    for node in &record.nodes {
        if !seen.insert(node.id.clone()) {
            continue;
        }
        draft.add_node(
            NodeDraft::inferred(node.id.as_str(), node.label.as_str())
                .with_detail(format!("Details: {}", node.label)),
        );
    }
    for edge in &record.edges {
        draft.link(&NodeId::new(edge.from.as_str()), &NodeId::new(edge.to.as_str()), edge.label.as_str());
    }
}

fn simplified(record: &RdfGraphRecord, root: &NodeId, draft: &mut GraphDraft) {
    let metrics: Vec<NodeDraft> = record
        .nodes
        .iter()
        .filter(|n| METRIC_MARKERS.iter().any(|m| n.id.contains(m)))
        .map(|n| {
            let value = record.literal(&n.id, "metricValue").unwrap_or("");
            NodeDraft::new(n.id.as_str(), format!("{}: {}", n.label, value), GroupTag::Financial)
        })
        .collect();
    attach(&METRICS, metrics, root, draft);

    let overviews: Vec<NodeDraft> = record
        .nodes
        .iter()
        .filter(|n| n.id.contains(PERFORMANCE_MARKER))
        .map(|n| {
            let value = record.literal(&n.id, "cpiReturn").unwrap_or("");
            NodeDraft::new(n.id.as_str(), format!("{}: {}%", n.label, value), GroupTag::Performance)
        })
        .collect();
    attach(&PERFORMANCE, overviews, root, draft);

    let articles: Vec<NodeDraft> = record
        .nodes
        .iter()
        .filter(|n| n.id.contains(NEWS_MARKER))
        .map(|n| {
            let headline = record.literal(&n.id, "headline").unwrap_or("News");
            NodeDraft::new(n.id.as_str(), headline, GroupTag::News)
        })
        .collect();
    attach(&NEWS, articles, root, draft);
}

fn attach(summary: &Summary, members: Vec<NodeDraft>, root: &NodeId, draft: &mut GraphDraft) {
    if members.is_empty() {
        return;
    }
    let hub = draft.add_node(
        NodeDraft::new(summary.id, summary.label, GroupTag::Summary)
            .with_detail(format!("{} items", members.len())),
    );
    draft.link(root, &hub, summary.root_edge);
    for member in members {
        let id = draft.add_node(member);
        draft.link(&hub, &id, summary.member_edge);
    }
}
