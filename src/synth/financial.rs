//! General financial graph: performance, metrics, statistics, news insights

use super::ids::{self, Section};
use super::{company_root, latest_articles, records_for, Synthesizer};
use crate::config::SectionCaps;
use crate::graph::{GraphDraft, GroupTag, NodeDraft, NodeId, Ticker};
use crate::records::{or_na, CanonicalRecord, MetricMap, NewsProvider, NewsRecord, StatisticsRecord};

#[derive(Debug, Clone, Default)]
pub struct FinancialSynthesizer {
    caps: SectionCaps,
}

impl FinancialSynthesizer {
    pub fn new(caps: SectionCaps) -> Self {
        Self { caps }
    }

    /// Emit every general section present in `records` under `root`
    pub(crate) fn sections(&self, root: &NodeId, records: &[&CanonicalRecord], draft: &mut GraphDraft) {
        for record in records {
            match record {
                CanonicalRecord::Performance(r) => performance(root, &r.metrics, draft),
                CanonicalRecord::FinancialMetric(r) => financial_metrics(root, &r.metrics, draft),
                CanonicalRecord::Statistics(r) => statistics(root, r, draft),
                CanonicalRecord::News(r) if r.provider == NewsProvider::Insights => {
                    news(root, r, self.caps.news, draft)
                }
                _ => {}
            }
        }
    }
}

impl Synthesizer for FinancialSynthesizer {
    fn synthesize(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> GraphDraft {
        let records = records_for(ticker, records);
        let mut draft = GraphDraft::new();
        let root = draft.add_node(company_root(ticker, &records));
        self.sections(&root, &records, &mut draft);
        draft
    }
}

fn performance(root: &NodeId, metrics: &MetricMap, draft: &mut GraphDraft) {
    if metrics.is_empty() {
        return;
    }
    let section = draft.add_node(
        NodeDraft::new(ids::section_id(root, Section::Performance), "Performance", GroupTag::Performance)
            .with_detail("Performance Overview"),
    );
    draft.link(root, &section, "Performance");

    for (metric, value) in metrics {
        let leaf = draft.add_node(
            NodeDraft::new(
                ids::performance_metric_id(root, metric),
                format!("{}: {}%", metric, value),
                GroupTag::PerformanceMetric,
            )
            .with_detail(format!("{} value: {}%", metric, value)),
        );
        draft.link(&section, &leaf, metric.as_str());
    }
}

fn financial_metrics(root: &NodeId, metrics: &MetricMap, draft: &mut GraphDraft) {
    if metrics.is_empty() {
        return;
    }
    let section = draft.add_node(
        NodeDraft::new(
            ids::section_id(root, Section::FinancialMetrics),
            "Financial Metrics",
            GroupTag::Financial,
        )
        .with_detail("Financial Metrics"),
    );
    draft.link(root, &section, "Financial Metrics");

    for (key, value) in metrics {
        let leaf = draft.add_node(
            NodeDraft::new(
                ids::financial_metric_id(root, key),
                format!("{}: {}", key, value),
                GroupTag::FinancialMetric,
            )
            .with_detail(format!("{} = {}", key, value)),
        );
        draft.link(&section, &leaf, key.as_str());
    }
}

fn statistics(root: &NodeId, record: &StatisticsRecord, draft: &mut GraphDraft) {
    if record.sections.values().all(|stats| stats.is_empty()) {
        return;
    }
    let stats_node = draft.add_node(
        NodeDraft::new(
            ids::section_id(root, Section::Statistics),
            "Financial Statistics",
            GroupTag::Statistics,
        )
        .with_detail("Financial Statistics"),
    );
    draft.link(root, &stats_node, "Statistics");

    for (name, stats) in record.sections.iter().filter(|(_, s)| !s.is_empty()) {
        let section = draft.add_node(
            NodeDraft::new(ids::statistics_section_id(root, name), name.as_str(), GroupTag::StatisticsSection)
                .with_detail(name.as_str()),
        );
        draft.link(&stats_node, &section, name.as_str());

        for (key, value) in stats {
            let leaf = draft.add_node(
                NodeDraft::new(
                    ids::statistic_id(root, name, key),
                    format!("{}: {}", key, value),
                    GroupTag::Statistic,
                )
                .with_detail(format!("{} = {}", key, value)),
            );
            draft.link(&section, &leaf, key.as_str());
        }
    }
}

fn news(root: &NodeId, record: &NewsRecord, cap: usize, draft: &mut GraphDraft) {
    if record.articles.is_empty() {
        return;
    }
    let section = draft.add_node(
        NodeDraft::new(ids::section_id(root, Section::News), "News", GroupTag::News).with_detail("News Insights"),
    );
    draft.link(root, &section, "News");

    for (index, article) in latest_articles(&record.articles, cap).into_iter().enumerate() {
        let label = article
            .title
            .clone()
            .unwrap_or_else(|| format!("Article {}", index + 1));
        let mut detail = format!(
            "Published on {}\n{}",
            or_na(article.published_at.as_deref()),
            or_na(article.url.as_deref())
        );
        if let Some(score) = article.sentiment {
            detail.push_str(&format!("\nSentiment: {}", score));
        }
        let leaf = draft.add_node(NodeDraft::new(section.child(index), label, GroupTag::NewsItem).with_detail(detail));
        draft.link(&section, &leaf, "Article");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        FinancialMetricRecord, MetricValue, NewsArticle, PerformanceRecord,
    };
    use indexmap::IndexMap;

    fn aapl() -> Ticker {
        Ticker::new("AAPL").unwrap()
    }

    fn metrics(pairs: &[(&str, f64)]) -> MetricMap {
        pairs.iter().map(|(k, v)| (k.to_string(), MetricValue::Number(*v))).collect()
    }

    #[test]
    fn test_performance_and_metrics() {
        let records = vec![
            CanonicalRecord::Performance(PerformanceRecord {
                ticker: aapl(),
                metrics: metrics(&[("1-Year Return", 12.0)]),
            }),
            CanonicalRecord::FinancialMetric(FinancialMetricRecord {
                ticker: aapl(),
                metrics: metrics(&[("PE Ratio", 18.0)]),
            }),
        ];
        let draft = FinancialSynthesizer::default().synthesize(&aapl(), &records);

        let ids: Vec<&str> = draft.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            ["AAPL", "AAPL_performance", "AAPL_perf_1-Year Return", "AAPL_financial", "AAPL_fin_PE Ratio"]
        );
        assert_eq!(draft.nodes[2].label, "1-Year Return: 12%");
        assert_eq!(draft.nodes[4].label, "PE Ratio: 18");
        assert_eq!(draft.edge_count(), 4);
    }

    #[test]
    fn test_empty_sections_are_not_emitted() {
        let mut sections = IndexMap::new();
        sections.insert("Valuation".to_string(), MetricMap::new());
        let records = vec![
            CanonicalRecord::Performance(PerformanceRecord { ticker: aapl(), metrics: MetricMap::new() }),
            CanonicalRecord::Statistics(StatisticsRecord { ticker: aapl(), sections }),
            CanonicalRecord::News(NewsRecord {
                ticker: aapl(),
                provider: NewsProvider::Insights,
                articles: vec![],
            }),
        ];
        let draft = FinancialSynthesizer::default().synthesize(&aapl(), &records);
        assert_eq!(draft.node_count(), 1);
        assert_eq!(draft.edge_count(), 0);
    }

    #[test]
    fn test_statistics_two_levels() {
        let mut sections = IndexMap::new();
        sections.insert("Valuation".to_string(), metrics(&[("EV", 3.1), ("PEG", 2.0)]));
        sections.insert("Empty".to_string(), MetricMap::new());
        let records = vec![CanonicalRecord::Statistics(StatisticsRecord { ticker: aapl(), sections })];
        let draft = FinancialSynthesizer::default().synthesize(&aapl(), &records);

        let ids: Vec<&str> = draft.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            ["AAPL", "AAPL_stats", "AAPL_stats_Valuation", "AAPL_stats_Valuation_EV", "AAPL_stats_Valuation_PEG"]
        );
        assert_eq!(draft.nodes[3].label, "EV: 3.1");
    }

    #[test]
    fn test_news_capped_and_sorted() {
        let articles = (0..12)
            .map(|i| NewsArticle {
                title: Some(format!("story {}", i)),
                published_at: Some(format!("2024-01-{:02}", i + 1)),
                url: Some(format!("https://news.example/{}", i)),
                ..Default::default()
            })
            .collect();
        let records = vec![CanonicalRecord::News(NewsRecord {
            ticker: aapl(),
            provider: NewsProvider::Insights,
            articles,
        })];
        let draft = FinancialSynthesizer::default().synthesize(&aapl(), &records);

        let items: Vec<_> = draft
            .nodes
            .iter()
            .filter(|n| n.hint == crate::graph::GroupHint::Explicit(GroupTag::NewsItem))
            .collect();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].label, "story 11");
        assert_eq!(items[0].id, "AAPL_news_0");
        assert_eq!(items[4].label, "story 7");
    }

    #[test]
    fn test_finnhub_news_is_ignored() {
        let records = vec![CanonicalRecord::News(NewsRecord {
            ticker: aapl(),
            provider: NewsProvider::Finnhub,
            articles: vec![NewsArticle::default()],
        })];
        let draft = FinancialSynthesizer::default().synthesize(&aapl(), &records);
        assert_eq!(draft.node_count(), 1);
    }
}
