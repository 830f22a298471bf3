//! Core type definitions for the company graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a node within one snapshot
///
/// IDs are derived from the owning company and the section path, so the
/// same inputs always reproduce the same ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a child ID by appending `_{segment}`
    pub fn child(&self, segment: impl fmt::Display) -> NodeId {
        NodeId(format!("{}_{}", self.0, segment))
    }

    /// True when this ID is `root` itself or namespaced under it
    pub fn is_under(&self, root: &str) -> bool {
        match self.0.strip_prefix(root) {
            Some(rest) => rest.is_empty() || rest.starts_with('_'),
            None => false,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TickerError {
    #[error("ticker is empty")]
    Empty,

    #[error("ticker {0:?} contains whitespace")]
    Whitespace(String),
}

/// Exchange ticker symbol identifying one company (e.g. "AAPL")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TickerError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TickerError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TickerError::Whitespace(trimmed.to_string()));
        }
        Ok(Ticker(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The root node ID of this company's subtree
    pub fn root_id(&self) -> NodeId {
        NodeId::new(self.0.clone())
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TickerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ticker::new(s)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl FromStr for Ticker {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::new(s)
    }
}

/// Closed set of semantic groups a node can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum GroupTag {
    Company,
    Performance,
    PerformanceMetric,
    Financial,
    FinancialMetric,
    Statistics,
    StatisticsSection,
    Statistic,
    News,
    NewsItem,
    Profile,
    Financials,
    FinancialsItem,
    Filings,
    FilingsItem,
    Insider,
    InsiderItem,
    Wikidata,
    WikidataItem,
    Dividend,
    Semantic,
    Competitor,
    Summary,
    Other,
}

impl GroupTag {
    pub const ALL: [GroupTag; 24] = [
        GroupTag::Company,
        GroupTag::Performance,
        GroupTag::PerformanceMetric,
        GroupTag::Financial,
        GroupTag::FinancialMetric,
        GroupTag::Statistics,
        GroupTag::StatisticsSection,
        GroupTag::Statistic,
        GroupTag::News,
        GroupTag::NewsItem,
        GroupTag::Profile,
        GroupTag::Financials,
        GroupTag::FinancialsItem,
        GroupTag::Filings,
        GroupTag::FilingsItem,
        GroupTag::Insider,
        GroupTag::InsiderItem,
        GroupTag::Wikidata,
        GroupTag::WikidataItem,
        GroupTag::Dividend,
        GroupTag::Semantic,
        GroupTag::Competitor,
        GroupTag::Summary,
        GroupTag::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupTag::Company => "Company",
            GroupTag::Performance => "Performance",
            GroupTag::PerformanceMetric => "PerformanceMetric",
            GroupTag::Financial => "Financial",
            GroupTag::FinancialMetric => "FinancialMetric",
            GroupTag::Statistics => "Statistics",
            GroupTag::StatisticsSection => "StatisticsSection",
            GroupTag::Statistic => "Statistic",
            GroupTag::News => "News",
            GroupTag::NewsItem => "NewsItem",
            GroupTag::Profile => "Profile",
            GroupTag::Financials => "Financials",
            GroupTag::FinancialsItem => "FinancialsItem",
            GroupTag::Filings => "Filings",
            GroupTag::FilingsItem => "FilingsItem",
            GroupTag::Insider => "Insider",
            GroupTag::InsiderItem => "InsiderItem",
            GroupTag::Wikidata => "Wikidata",
            GroupTag::WikidataItem => "WikidataItem",
            GroupTag::Dividend => "Dividend",
            GroupTag::Semantic => "Semantic",
            GroupTag::Competitor => "Competitor",
            GroupTag::Summary => "Summary",
            GroupTag::Other => "Other",
        }
    }

    /// Parse a group name; anything outside the closed set is `Other`
    pub fn classify(name: &str) -> GroupTag {
        GroupTag::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == name)
            .unwrap_or(GroupTag::Other)
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// High-level filter category expanding to several groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facet {
    Performance,
    Financial,
    Statistics,
    News,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Performance, Facet::Financial, Facet::Statistics, Facet::News];

    /// Groups shown for this facet; `Company` stays so the root keeps context
    pub fn groups(&self) -> &'static [GroupTag] {
        match self {
            Facet::Performance => &[GroupTag::Performance, GroupTag::PerformanceMetric, GroupTag::Company],
            Facet::Financial => &[GroupTag::Financial, GroupTag::FinancialMetric, GroupTag::Company],
            Facet::Statistics => &[
                GroupTag::Statistics,
                GroupTag::StatisticsSection,
                GroupTag::Statistic,
                GroupTag::Company,
            ],
            Facet::News => &[GroupTag::News, GroupTag::NewsItem, GroupTag::Company],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Performance => "Performance",
            Facet::Financial => "Financial",
            Facet::Statistics => "Statistics",
            Facet::News => "News",
        }
    }

    pub fn parse(name: &str) -> Option<Facet> {
        Facet::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
