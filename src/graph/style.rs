//! Static per-group colour table handed to the renderer alongside a snapshot

use super::types::GroupTag;
use indexmap::IndexMap;
use serde::Serialize;

/// Border/background colour pair for one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStyle {
    pub border: &'static str,
    pub background: &'static str,
}

impl GroupStyle {
    const fn new(border: &'static str, background: &'static str) -> Self {
        GroupStyle { border, background }
    }
}

/// Colour used for a group
pub fn style_for(group: GroupTag) -> GroupStyle {
    match group {
        GroupTag::Company => GroupStyle::new("#3366FF", "#99CCFF"),
        GroupTag::Performance => GroupStyle::new("#33CC33", "#99FF99"),
        GroupTag::PerformanceMetric => GroupStyle::new("#388E3C", "#C8E6C9"),
        GroupTag::Financial => GroupStyle::new("#FF3333", "#FF9999"),
        GroupTag::FinancialMetric => GroupStyle::new("#D32F2F", "#FFCDD2"),
        GroupTag::Statistics => GroupStyle::new("#673AB7", "#D1C4E9"),
        GroupTag::StatisticsSection => GroupStyle::new("#5E35B1", "#B39DDB"),
        GroupTag::Statistic => GroupStyle::new("#8E24AA", "#E1BEE7"),
        GroupTag::News => GroupStyle::new("#FFA000", "#FFE082"),
        GroupTag::NewsItem => GroupStyle::new("#FBC02D", "#FFF9C4"),
        GroupTag::Profile => GroupStyle::new("#7CB342", "#C5E1A5"),
        GroupTag::Financials => GroupStyle::new("#5E35B1", "#B39DDB"),
        GroupTag::FinancialsItem => GroupStyle::new("#7E57C2", "#D1C4E9"),
        GroupTag::Filings => GroupStyle::new("#FFA000", "#FFE082"),
        GroupTag::FilingsItem => GroupStyle::new("#FFA000", "#FFD54F"),
        GroupTag::Insider => GroupStyle::new("#00897B", "#80CBC4"),
        GroupTag::InsiderItem => GroupStyle::new("#00695C", "#4DB6AC"),
        GroupTag::Wikidata => GroupStyle::new("#AB47BC", "#CE93D8"),
        GroupTag::WikidataItem => GroupStyle::new("#EC407A", "#F48FB1"),
        GroupTag::Dividend => GroupStyle::new("#FF9800", "#FFCC80"),
        GroupTag::Semantic => GroupStyle::new("#AB47BC", "#CE93D8"),
        GroupTag::Competitor => GroupStyle::new("#E53935", "#EF9A9A"),
        GroupTag::Summary => GroupStyle::new("#FFA500", "#FFD700"),
        GroupTag::Other => GroupStyle::new("#999999", "#CCCCCC"),
    }
}

/// Group name -> `{color: {border, background}}`, in the renderer's option shape
#[derive(Debug, Clone, Serialize)]
pub struct GroupOptions {
    pub color: GroupStyle,
}

pub fn group_options() -> IndexMap<&'static str, GroupOptions> {
    GroupTag::ALL
        .iter()
        .map(|g| (g.as_str(), GroupOptions { color: style_for(*g) }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_group_has_style() {
        let options = group_options();
        assert_eq!(options.len(), GroupTag::ALL.len());
        assert_eq!(options["Company"].color.background, "#99CCFF");
        assert_eq!(style_for(GroupTag::Other).border, "#999999");
    }
}
