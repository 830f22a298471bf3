//! Node/edge synthesis from canonical records
//!
//! Four modes share the [`Synthesizer`] trait:
//! - [`FinancialSynthesizer`]: performance, metrics, statistics, news insights
//! - [`FinnhubSynthesizer`]: profile, statements, filings, insider, company news, Wikidata
//! - [`RdfSynthesizer`]: triple-service graphs, detailed or simplified
//! - [`EnrichedSynthesizer`]: FIGI-rooted linked-open-data view
//!
//! [`CombinedSynthesizer`] runs the first two under one ticker root and is
//! the default. Output is a [`GraphDraft`]; deduplication, taxonomy and
//! filtering happen later in the pipeline.

mod enriched;
mod financial;
mod finnhub;
mod ids;
mod rdf;

pub use enriched::EnrichedSynthesizer;
pub use financial::FinancialSynthesizer;
pub use finnhub::FinnhubSynthesizer;
pub use ids::{
    competitor_id, financial_metric_id, ordinal_id, performance_metric_id, section_id,
    statistic_id, statistics_section_id, Section,
};
pub use rdf::RdfSynthesizer;

use crate::config::SectionCaps;
use crate::graph::{GraphDraft, GroupTag, NodeDraft, NodeId, TaxonomyContext, Ticker};
use crate::records::{CanonicalRecord, NewsArticle};
use serde::{Deserialize, Serialize};

/// Turns one company's records into graph primitives
pub trait Synthesizer {
    /// Emit the company's subtree; records for other tickers are ignored
    fn synthesize(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> GraphDraft;

    /// ID of the company root this synthesizer emits
    fn root_id(&self, ticker: &Ticker, _records: &[CanonicalRecord]) -> NodeId {
        ticker.root_id()
    }

    /// Context for label-based group inference
    fn taxonomy(&self, ticker: &Ticker) -> TaxonomyContext {
        TaxonomyContext::for_company(ticker.as_str())
    }
}

/// Which view of a triple-service graph to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RdfView {
    #[default]
    Detailed,
    Simplified,
}

/// Synthesis mode selected for a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SynthesisMode {
    /// General financial graph plus alternate-provider sections
    #[default]
    Combined,
    Financial,
    Finnhub,
    /// Alternate-provider graph limited to one section
    FinnhubSection(Section),
    Rdf(RdfView),
    Enriched,
}

impl SynthesisMode {
    pub fn synthesizer(&self, caps: &SectionCaps) -> Box<dyn Synthesizer + Send + Sync> {
        match self {
            SynthesisMode::Combined => Box::new(CombinedSynthesizer::new(caps.clone())),
            SynthesisMode::Financial => Box::new(FinancialSynthesizer::new(caps.clone())),
            SynthesisMode::Finnhub => Box::new(FinnhubSynthesizer::new(caps.clone())),
            SynthesisMode::FinnhubSection(section) => {
                Box::new(FinnhubSynthesizer::new(caps.clone()).only(*section))
            }
            SynthesisMode::Rdf(view) => Box::new(RdfSynthesizer::new(*view)),
            SynthesisMode::Enriched => Box::new(EnrichedSynthesizer::new()),
        }
    }
}

/// General and alternate-provider sections under a single ticker root
#[derive(Debug, Clone, Default)]
pub struct CombinedSynthesizer {
    financial: FinancialSynthesizer,
    finnhub: FinnhubSynthesizer,
}

impl CombinedSynthesizer {
    pub fn new(caps: SectionCaps) -> Self {
        Self {
            financial: FinancialSynthesizer::new(caps.clone()),
            finnhub: FinnhubSynthesizer::new(caps),
        }
    }
}

impl Synthesizer for CombinedSynthesizer {
    fn synthesize(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> GraphDraft {
        let records = records_for(ticker, records);
        let mut draft = GraphDraft::new();
        let root = draft.add_node(company_root(ticker, &records));
        self.financial.sections(&root, &records, &mut draft);
        self.finnhub.sections(&root, &records, &mut draft);
        draft
    }
}

/// Synthesize with the default combined mode and default caps
pub fn synthesize(ticker: &Ticker, records: &[CanonicalRecord]) -> GraphDraft {
    CombinedSynthesizer::default().synthesize(ticker, records)
}

/// Records belonging to `ticker`, in their original order
pub(crate) fn records_for<'a>(ticker: &Ticker, records: &'a [CanonicalRecord]) -> Vec<&'a CanonicalRecord> {
    records.iter().filter(|r| r.ticker() == ticker).collect()
}

/// Root node keyed by ticker; labeled with the best known company name
pub(crate) fn company_root(ticker: &Ticker, records: &[&CanonicalRecord]) -> NodeDraft {
    let name = records
        .iter()
        .find_map(|r| match r {
            CanonicalRecord::Company(c) => c.name.clone(),
            _ => None,
        })
        .or_else(|| {
            records.iter().find_map(|r| match r {
                CanonicalRecord::Profile(p) => Some(p.name.clone()),
                _ => None,
            })
        });

    let label = name.unwrap_or_else(|| ticker.to_string());
    let detail = if label == ticker.as_str() {
        format!("Company: {}", ticker)
    } else {
        format!("Company: {}\nTicker: {}", label, ticker)
    };
    NodeDraft::new(ticker.root_id(), label, GroupTag::Company).with_detail(detail)
}

/// Timestamp used to order articles; unparseable dates sort last
fn published_ts(article: &NewsArticle) -> Option<i64> {
    let raw = article.published_at.as_deref()?.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Newest first, stable for ties, truncated to `cap`
pub(crate) fn latest_articles(articles: &[NewsArticle], cap: usize) -> Vec<&NewsArticle> {
    let mut sorted: Vec<&NewsArticle> = articles.iter().collect();
    sorted.sort_by(|a, b| published_ts(b).cmp(&published_ts(a)));
    sorted.truncate(cap);
    sorted
}

/// First `max` characters of `s`
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CompanyRecord, ProfileRecord};

    fn article(date: Option<&str>, title: &str) -> NewsArticle {
        NewsArticle {
            title: Some(title.to_string()),
            published_at: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_latest_articles_order() {
        let articles = vec![
            article(Some("2024-01-02"), "b"),
            article(None, "none"),
            article(Some("2024-03-01T10:00:00+00:00"), "c"),
            article(Some("2024-01-02 00:00:00"), "b2"),
            article(Some("2023-12-31"), "a"),
        ];
        let titles: Vec<_> = latest_articles(&articles, 4)
            .iter()
            .map(|a| a.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, ["c", "b", "b2", "a"]);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("2024-01-02T00:00:00Z", 10), "2024-01-02");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
    }

    #[test]
    fn test_company_root_label_precedence() {
        let ticker = Ticker::new("AAPL").unwrap();
        let profile = CanonicalRecord::Profile(ProfileRecord {
            ticker: ticker.clone(),
            name: "Apple Inc".into(),
            industry: None,
            market_cap: None,
            website: None,
            ipo_date: None,
        });
        let company = CanonicalRecord::Company(CompanyRecord {
            ticker: ticker.clone(),
            name: Some("Apple".into()),
        });

        assert_eq!(company_root(&ticker, &[]).label, "AAPL");
        assert_eq!(company_root(&ticker, &[&profile]).label, "Apple Inc");
        assert_eq!(company_root(&ticker, &[&profile, &company]).label, "Apple");
        assert_eq!(company_root(&ticker, &[&profile]).id, "AAPL");
    }

    #[test]
    fn test_mode_yaml_names() {
        let mode: SynthesisMode = serde_yaml::from_str("Enriched").unwrap();
        assert_eq!(mode, SynthesisMode::Enriched);
    }
}
