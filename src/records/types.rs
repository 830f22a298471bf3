//! Canonical record shapes, one per source domain
//!
//! Every collection is always present (possibly empty); optional scalar
//! fields are `Option`. Nothing raw crosses into the synthesizers.

use crate::graph::Ticker;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value from a metrics payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Read a scalar; numeric strings become numbers, containers are rejected
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(MetricValue::Number),
            serde_json::Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Some(MetricValue::Number(n)),
                _ => Some(MetricValue::Text(s.clone())),
            },
            serde_json::Value::Bool(b) => Some(MetricValue::Text(b.to_string())),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

/// Ordered name -> value map
pub type MetricMap = IndexMap<String, MetricValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub ticker: Ticker,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub ticker: Ticker,
    /// Period label -> percent
    pub metrics: MetricMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialMetricRecord {
    pub ticker: Ticker,
    pub metrics: MetricMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRecord {
    pub ticker: Ticker,
    pub sections: IndexMap<String, MetricMap>,
}

/// Which upstream produced a news record; each synthesizer labels its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsProvider {
    /// Financial data service news insights
    Insights,
    /// Alternate provider company news
    Finnhub,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewsArticle {
    pub title: Option<String>,
    /// RFC 3339 or plain date, as delivered
    pub published_at: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub sentiment: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsRecord {
    pub ticker: Ticker,
    pub provider: NewsProvider,
    pub articles: Vec<NewsArticle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub ticker: Ticker,
    pub name: String,
    pub industry: Option<String>,
    pub market_cap: Option<MetricValue>,
    pub website: Option<String>,
    pub ipo_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementLine {
    pub concept: Option<String>,
    pub label: Option<String>,
    pub value: Option<MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementPeriod {
    pub end_date: Option<String>,
    pub accepted_date: Option<String>,
    pub form: Option<String>,
    pub year: Option<String>,
    pub balance_sheet: Vec<StatementLine>,
    pub cash_flow: Vec<StatementLine>,
    pub income_statement: Vec<StatementLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatementRecord {
    pub ticker: Ticker,
    pub periods: Vec<StatementPeriod>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecFiling {
    pub form: Option<String>,
    pub filed_date: Option<String>,
    pub accepted_date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecFilingRecord {
    pub ticker: Ticker,
    pub filings: Vec<SecFiling>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsiderTransaction {
    pub name: Option<String>,
    pub transaction_date: Option<String>,
    pub filing_date: Option<String>,
    pub shares: Option<f64>,
    pub change: Option<f64>,
    pub price: Option<f64>,
    pub code: Option<String>,
}

impl InsiderTransaction {
    /// Share count used for ordering; missing counts as zero
    pub fn share_count(&self) -> f64 {
        self.shares.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsiderRecord {
    pub ticker: Ticker,
    pub transactions: Vec<InsiderTransaction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WikidataRecord {
    pub ticker: Ticker,
    pub headquarters: Option<String>,
    pub inception_date: Option<String>,
    pub industry: Option<String>,
}

impl WikidataRecord {
    pub fn is_empty(&self) -> bool {
        self.headquarters.is_none() && self.inception_date.is_none() && self.industry.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdfNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdfEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// Near-graph payload from the triple service
#[derive(Debug, Clone, PartialEq)]
pub struct RdfGraphRecord {
    pub ticker: Ticker,
    pub nodes: Vec<RdfNode>,
    pub edges: Vec<RdfEdge>,
}

impl RdfGraphRecord {
    /// Target of the first edge from `node` with predicate `label`
    pub fn literal(&self, node: &str, label: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|e| e.from == node && e.label == label)
            .map(|e| e.to.as_str())
    }
}

/// Stable identifier mapping for the enriched mode
#[derive(Debug, Clone, PartialEq)]
pub struct FigiRecord {
    pub ticker: Ticker,
    pub figi: String,
    pub name: String,
    pub security_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DividendEvent {
    pub amount: Option<MetricValue>,
    pub payment_date: Option<String>,
    pub dividend_yield: Option<MetricValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividendRecord {
    pub ticker: Ticker,
    /// Most recent first, as delivered
    pub events: Vec<DividendEvent>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Competitor {
    pub name: String,
    pub ticker: Option<String>,
    pub figi: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorRecord {
    pub ticker: Ticker,
    pub competitors: Vec<Competitor>,
}

/// One normalized source payload
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalRecord {
    Company(CompanyRecord),
    Performance(PerformanceRecord),
    FinancialMetric(FinancialMetricRecord),
    Statistics(StatisticsRecord),
    News(NewsRecord),
    Profile(ProfileRecord),
    FinancialStatement(FinancialStatementRecord),
    SecFiling(SecFilingRecord),
    Insider(InsiderRecord),
    Wikidata(WikidataRecord),
    RdfGraph(RdfGraphRecord),
    Figi(FigiRecord),
    Dividend(DividendRecord),
    Competitor(CompetitorRecord),
}

impl CanonicalRecord {
    pub fn ticker(&self) -> &Ticker {
        match self {
            CanonicalRecord::Company(r) => &r.ticker,
            CanonicalRecord::Performance(r) => &r.ticker,
            CanonicalRecord::FinancialMetric(r) => &r.ticker,
            CanonicalRecord::Statistics(r) => &r.ticker,
            CanonicalRecord::News(r) => &r.ticker,
            CanonicalRecord::Profile(r) => &r.ticker,
            CanonicalRecord::FinancialStatement(r) => &r.ticker,
            CanonicalRecord::SecFiling(r) => &r.ticker,
            CanonicalRecord::Insider(r) => &r.ticker,
            CanonicalRecord::Wikidata(r) => &r.ticker,
            CanonicalRecord::RdfGraph(r) => &r.ticker,
            CanonicalRecord::Figi(r) => &r.ticker,
            CanonicalRecord::Dividend(r) => &r.ticker,
            CanonicalRecord::Competitor(r) => &r.ticker,
        }
    }
}

/// "N/A" for missing display values
pub(crate) fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_value_from_json() {
        assert_eq!(MetricValue::from_json(&json!(12)), Some(MetricValue::Number(12.0)));
        assert_eq!(MetricValue::from_json(&json!("3.5")), Some(MetricValue::Number(3.5)));
        assert_eq!(MetricValue::from_json(&json!("1.2T")), Some(MetricValue::Text("1.2T".into())));
        assert_eq!(MetricValue::from_json(&json!(null)), None);
        assert_eq!(MetricValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_metric_value_display() {
        assert_eq!(MetricValue::Number(12.0).to_string(), "12");
        assert_eq!(MetricValue::Number(-4.25).to_string(), "-4.25");
        assert_eq!(MetricValue::from("N/A").to_string(), "N/A");
    }

    #[test]
    fn test_rdf_literal_lookup() {
        let ticker = Ticker::new("AAPL").unwrap();
        let record = RdfGraphRecord {
            ticker,
            nodes: vec![],
            edges: vec![
                RdfEdge { from: "m1".into(), to: "Revenue".into(), label: "name".into() },
                RdfEdge { from: "m1".into(), to: "391".into(), label: "metricValue".into() },
            ],
        };
        assert_eq!(record.literal("m1", "metricValue"), Some("391"));
        assert_eq!(record.literal("m2", "metricValue"), None);
    }
}
