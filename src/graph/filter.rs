//! Company and group filtering
//!
//! Filters select nodes only. Edges pass through untouched and are pruned
//! when the snapshot is finalized, so filters compose freely:
//! filtering by company then by group equals filtering by both at once.

use super::node::GraphNode;
use super::snapshot::Subgraph;
use super::types::{Facet, GroupTag};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
}

/// Which company subtree to keep
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompanySelector {
    #[default]
    All,
    /// Root ID of the company (ticker, or FIGI in enriched mode)
    Only(String),
}

impl CompanySelector {
    pub fn matches(&self, node: &GraphNode) -> bool {
        match self {
            CompanySelector::All => true,
            CompanySelector::Only(root) => node.id.is_under(root),
        }
    }
}

impl FromStr for CompanySelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(SelectorError::Empty),
            "All" | "all" => Ok(CompanySelector::All),
            other => Ok(CompanySelector::Only(other.to_string())),
        }
    }
}

/// Which groups to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupSelector {
    #[default]
    All,
    Facet(Facet),
    /// A single concrete group, shown together with `Company`
    Group(GroupTag),
}

impl GroupSelector {
    pub fn matches(&self, node: &GraphNode) -> bool {
        match self {
            GroupSelector::All => true,
            GroupSelector::Facet(facet) => facet.groups().contains(&node.group),
            GroupSelector::Group(group) => node.group == *group || node.group == GroupTag::Company,
        }
    }
}

impl FromStr for GroupSelector {
    type Err = SelectorError;

    /// Facet names take precedence over group names they share
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SelectorError::Empty);
        }
        if s == "All" || s == "all" {
            return Ok(GroupSelector::All);
        }
        if let Some(facet) = Facet::parse(s) {
            return Ok(GroupSelector::Facet(facet));
        }
        Ok(GroupSelector::Group(GroupTag::classify(s)))
    }
}

impl fmt::Display for GroupSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSelector::All => f.write_str("All"),
            GroupSelector::Facet(facet) => write!(f, "{}", facet),
            GroupSelector::Group(group) => write!(f, "{}", group),
        }
    }
}

/// Combined filter; both selectors must match (logical AND)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub company: CompanySelector,
    #[serde(default)]
    pub group: GroupSelector,
}

impl FilterSpec {
    pub fn company(root: impl Into<String>) -> Self {
        FilterSpec {
            company: CompanySelector::Only(root.into()),
            group: GroupSelector::All,
        }
    }

    pub fn facet(facet: Facet) -> Self {
        FilterSpec {
            company: CompanySelector::All,
            group: GroupSelector::Facet(facet),
        }
    }

    pub fn with_group(mut self, group: GroupSelector) -> Self {
        self.group = group;
        self
    }

    pub fn is_all(&self) -> bool {
        self.company == CompanySelector::All && self.group == GroupSelector::All
    }

    pub fn matches(&self, node: &GraphNode) -> bool {
        self.company.matches(node) && self.group.matches(node)
    }
}

/// Keep nodes matching `spec`; edges are carried over unchanged
pub fn filter(graph: Subgraph, spec: &FilterSpec) -> Subgraph {
    if spec.is_all() {
        return graph;
    }
    let Subgraph { nodes, edges } = graph;
    let nodes: Vec<GraphNode> = nodes.into_iter().filter(|n| spec.matches(n)).collect();
    Subgraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphEdge;

    fn sample() -> Subgraph {
        Subgraph {
            nodes: vec![
                GraphNode::new("AAPL", "AAPL", GroupTag::Company),
                GraphNode::new("AAPL_performance", "Performance", GroupTag::Performance),
                GraphNode::new("AAPL_perf_1Y", "1Y: 3%", GroupTag::PerformanceMetric),
                GraphNode::new("AAPL_financial", "Financial Metrics", GroupTag::Financial),
                GraphNode::new("AAPL_news", "News", GroupTag::News),
                GraphNode::new("AAPLX", "AAPLX", GroupTag::Company),
                GraphNode::new("MSFT", "MSFT", GroupTag::Company),
                GraphNode::new("MSFT_performance", "Performance", GroupTag::Performance),
            ],
            edges: vec![
                GraphEdge::new("AAPL", "AAPL_performance", "Performance"),
                GraphEdge::new("MSFT", "MSFT_performance", "Performance"),
            ],
        }
    }

    fn ids(g: &Subgraph) -> Vec<&str> {
        g.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_company_filter() {
        let out = filter(sample(), &FilterSpec::company("AAPL"));
        assert_eq!(
            ids(&out),
            ["AAPL", "AAPL_performance", "AAPL_perf_1Y", "AAPL_financial", "AAPL_news"]
        );
        assert_eq!(out.edges.len(), 2);
    }

    #[test]
    fn test_facet_filter() {
        let out = filter(sample(), &FilterSpec::facet(Facet::Performance));
        assert_eq!(
            ids(&out),
            ["AAPL", "AAPL_performance", "AAPL_perf_1Y", "AAPLX", "MSFT", "MSFT_performance"]
        );
    }

    #[test]
    fn test_single_group_keeps_company() {
        let spec = FilterSpec::default().with_group(GroupSelector::Group(GroupTag::News));
        let out = filter(sample(), &spec);
        assert_eq!(ids(&out), ["AAPL", "AAPL_news", "AAPLX", "MSFT"]);
    }

    #[test]
    fn test_filters_compose() {
        let combined = FilterSpec::company("AAPL").with_group(GroupSelector::Facet(Facet::Financial));
        let stepwise = filter(
            filter(sample(), &FilterSpec::company("AAPL")),
            &FilterSpec::facet(Facet::Financial),
        );
        assert_eq!(filter(sample(), &combined), stepwise);
        assert_eq!(ids(&stepwise), ["AAPL", "AAPL_financial"]);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("All".parse::<GroupSelector>().unwrap(), GroupSelector::All);
        assert_eq!(
            "News".parse::<GroupSelector>().unwrap(),
            GroupSelector::Facet(Facet::News)
        );
        assert_eq!(
            "Summary".parse::<GroupSelector>().unwrap(),
            GroupSelector::Group(GroupTag::Summary)
        );
        assert_eq!(
            "Bogus".parse::<GroupSelector>().unwrap(),
            GroupSelector::Group(GroupTag::Other)
        );
        assert_eq!("".parse::<GroupSelector>(), Err(SelectorError::Empty));
        assert_eq!(
            "TSLA".parse::<CompanySelector>().unwrap(),
            CompanySelector::Only("TSLA".into())
        );
    }
}
