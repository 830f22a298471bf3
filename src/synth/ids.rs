//! Deterministic node ID scheme
//!
//! Every ID is a pure function of the company root, the section kind, an
//! optional key and an optional ordinal, joined with `_`. Re-running
//! synthesis on the same records reproduces the same IDs.

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// A section hanging directly off a company root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Performance,
    FinancialMetrics,
    Statistics,
    News,
    CompanyNews,
    Profile,
    Financials,
    SecFilings,
    Insider,
    Wikidata,
    Dividend,
    Semantic,
}

impl Section {
    pub fn slug(&self) -> &'static str {
        match self {
            Section::Performance => "performance",
            Section::FinancialMetrics => "financial",
            Section::Statistics => "stats",
            Section::News => "news",
            Section::CompanyNews => "company_news",
            Section::Profile => "profile",
            Section::Financials => "financials",
            Section::SecFilings => "sec",
            Section::Insider => "insider",
            Section::Wikidata => "wikidata",
            Section::Dividend => "dividend",
            Section::Semantic => "semantic",
        }
    }
}

/// `{root}_{slug}`
pub fn section_id(root: &NodeId, section: Section) -> NodeId {
    root.child(section.slug())
}

/// `{root}_perf_{metric}`
pub fn performance_metric_id(root: &NodeId, metric: &str) -> NodeId {
    root.child(format!("perf_{}", metric))
}

/// `{root}_fin_{key}`
pub fn financial_metric_id(root: &NodeId, key: &str) -> NodeId {
    root.child(format!("fin_{}", key))
}

/// `{root}_stats_{section}`
pub fn statistics_section_id(root: &NodeId, section: &str) -> NodeId {
    section_id(root, Section::Statistics).child(section)
}

/// `{root}_stats_{section}_{key}`
pub fn statistic_id(root: &NodeId, section: &str, key: &str) -> NodeId {
    statistics_section_id(root, section).child(key)
}

/// `{parent}_{kind}{ordinal}`, e.g. `AAPL_sec_filing0`
pub fn ordinal_id(parent: &NodeId, kind: &str, ordinal: usize) -> NodeId {
    parent.child(format!("{}{}", kind, ordinal))
}

/// `{root}_comp{ordinal}`
pub fn competitor_id(root: &NodeId, ordinal: usize) -> NodeId {
    ordinal_id(root, "comp", ordinal)
}
