//! Raw per-domain JSON -> canonical records
//!
//! Upstream payloads are partially populated and differ per provider.
//! Explicit "no data" markers (`{error: ..}`, `{note: ..}`, `null`) are
//! reported as [`NormalizationFailure::SourceAbsent`]; missing or
//! mistyped collections become empty collections.

use super::types::*;
use crate::graph::Ticker;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Source domain of a raw payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DomainKind {
    Company,
    Profile,
    Financials,
    SecFilings,
    Insider,
    CompanyNews,
    Wikidata,
    PerformanceOverview,
    FinancialMetrics,
    Statistics,
    NewsInsights,
    RdfGraph,
    FigiMapping,
    Dividends,
    Competitors,
}

impl DomainKind {
    pub const ALL: [DomainKind; 15] = [
        DomainKind::Company,
        DomainKind::Profile,
        DomainKind::Financials,
        DomainKind::SecFilings,
        DomainKind::Insider,
        DomainKind::CompanyNews,
        DomainKind::Wikidata,
        DomainKind::PerformanceOverview,
        DomainKind::FinancialMetrics,
        DomainKind::Statistics,
        DomainKind::NewsInsights,
        DomainKind::RdfGraph,
        DomainKind::FigiMapping,
        DomainKind::Dividends,
        DomainKind::Competitors,
    ];

    /// Key used for this domain in bundle files
    pub fn wire_key(&self) -> &'static str {
        match self {
            DomainKind::Company => "company",
            DomainKind::Profile => "profile",
            DomainKind::Financials => "financials",
            DomainKind::SecFilings => "secFilings",
            DomainKind::Insider => "insider",
            DomainKind::CompanyNews => "news",
            DomainKind::Wikidata => "wikidata",
            DomainKind::PerformanceOverview => "performance_overview",
            DomainKind::FinancialMetrics => "financial_metrics",
            DomainKind::Statistics => "financial_statistics",
            DomainKind::NewsInsights => "news_insights",
            DomainKind::RdfGraph => "rdf_graph",
            DomainKind::FigiMapping => "figi",
            DomainKind::Dividends => "dividend",
            DomainKind::Competitors => "competitors",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown domain key: {0}")]
pub struct UnknownDomain(pub String);

impl FromStr for DomainKind {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DomainKind::ALL
            .iter()
            .copied()
            .find(|d| d.wire_key() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

/// Why a payload produced no record; always recoverable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationFailure {
    #[error("{domain}: source reported no data ({reason})")]
    SourceAbsent { domain: DomainKind, reason: String },

    #[error("{domain}: expected {expected}")]
    Malformed { domain: DomainKind, expected: &'static str },
}

pub type NormalizeResult = Result<CanonicalRecord, NormalizationFailure>;

/// Normalize one raw payload for `ticker`
pub fn normalize(kind: DomainKind, ticker: &Ticker, raw: &Value) -> NormalizeResult {
    if let Some(reason) = absence_marker(raw) {
        return Err(NormalizationFailure::SourceAbsent { domain: kind, reason });
    }
    let ticker = ticker.clone();

    let record = match kind {
        DomainKind::Company => {
            let obj = expect_object(kind, raw)?;
            CanonicalRecord::Company(CompanyRecord {
                ticker,
                name: text(obj, "name"),
            })
        }
        DomainKind::Profile => CanonicalRecord::Profile(profile(kind, ticker, raw)?),
        DomainKind::Financials => CanonicalRecord::FinancialStatement(FinancialStatementRecord {
            ticker,
            periods: items(raw, true).iter().filter_map(|v| v.as_object()).map(statement_period).collect(),
        }),
        DomainKind::SecFilings => CanonicalRecord::SecFiling(SecFilingRecord {
            ticker,
            filings: items(raw, false)
                .iter()
                .filter_map(|v| v.as_object())
                .map(|o| SecFiling {
                    form: text(o, "form"),
                    filed_date: text(o, "filedDate"),
                    accepted_date: text(o, "acceptedDate"),
                    url: text(o, "filingUrl").or_else(|| text(o, "reportUrl")),
                })
                .collect(),
        }),
        DomainKind::Insider => CanonicalRecord::Insider(InsiderRecord {
            ticker,
            transactions: items(raw, true)
                .iter()
                .filter_map(|v| v.as_object())
                .map(|o| InsiderTransaction {
                    name: text(o, "name"),
                    transaction_date: text(o, "transactionDate"),
                    filing_date: text(o, "filingDate"),
                    shares: number(o, "share"),
                    change: number(o, "change"),
                    price: number(o, "transactionPrice"),
                    code: text(o, "transactionCode"),
                })
                .collect(),
        }),
        DomainKind::CompanyNews => CanonicalRecord::News(NewsRecord {
            ticker,
            provider: NewsProvider::Finnhub,
            articles: items(raw, false)
                .iter()
                .filter_map(|v| v.as_object())
                .map(|o| NewsArticle {
                    title: text(o, "headline"),
                    published_at: o.get("datetime").and_then(unix_to_rfc3339),
                    url: text(o, "url"),
                    source: text(o, "source"),
                    sentiment: None,
                })
                .collect(),
        }),
        DomainKind::NewsInsights => CanonicalRecord::News(NewsRecord {
            ticker,
            provider: NewsProvider::Insights,
            articles: items(raw, false)
                .iter()
                .filter_map(|v| v.as_object())
                .map(|o| NewsArticle {
                    title: text(o, "title"),
                    published_at: text(o, "publicationDate"),
                    url: text(o, "url"),
                    source: text(o, "source"),
                    sentiment: number(o, "sentimentScore"),
                })
                .collect(),
        }),
        DomainKind::Wikidata => {
            let obj = expect_object(kind, raw)?;
            CanonicalRecord::Wikidata(WikidataRecord {
                ticker,
                headquarters: binding(obj, &["headquartersLabel", "hqLabel"]),
                inception_date: binding(obj, &["inception", "foundingDate"]),
                industry: binding(obj, &["industryLabel"]),
            })
        }
        DomainKind::PerformanceOverview => CanonicalRecord::Performance(PerformanceRecord {
            ticker,
            metrics: metric_map(raw.as_object()),
        }),
        DomainKind::FinancialMetrics => CanonicalRecord::FinancialMetric(FinancialMetricRecord {
            ticker,
            metrics: metric_map(raw.as_object()),
        }),
        DomainKind::Statistics => CanonicalRecord::Statistics(StatisticsRecord {
            ticker,
            sections: raw
                .as_object()
                .map(|o| {
                    o.iter()
                        .filter_map(|(section, stats)| {
                            stats.as_object().map(|s| (section.clone(), metric_map(Some(s))))
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }),
        DomainKind::RdfGraph => {
            let obj = expect_object(kind, raw)?;
            CanonicalRecord::RdfGraph(rdf_graph(ticker, obj))
        }
        DomainKind::FigiMapping => CanonicalRecord::Figi(figi(kind, ticker, raw)?),
        DomainKind::Dividends => CanonicalRecord::Dividend(DividendRecord {
            ticker,
            events: items(raw, true)
                .iter()
                .filter_map(|v| v.as_object())
                .map(|o| DividendEvent {
                    amount: o.get("amount").and_then(MetricValue::from_json),
                    payment_date: text(o, "paymentDate").or_else(|| text(o, "payDate")),
                    dividend_yield: o.get("dividendYield").and_then(MetricValue::from_json),
                })
                .collect(),
        }),
        DomainKind::Competitors => CanonicalRecord::Competitor(CompetitorRecord {
            ticker,
            competitors: items(raw, true).iter().filter_map(competitor).collect(),
        }),
    };
    Ok(record)
}

/// `null`, `{error: ..}` or `{note: ..}` mean the source had nothing
fn absence_marker(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => Some("null payload".to_string()),
        Value::Object(obj) => ["error", "note"].iter().find_map(|key| {
            obj.get(*key).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        }),
        _ => None,
    }
}

fn expect_object(kind: DomainKind, raw: &Value) -> Result<&Map<String, Value>, NormalizationFailure> {
    raw.as_object().ok_or(NormalizationFailure::Malformed {
        domain: kind,
        expected: "a JSON object",
    })
}

/// Array payload, optionally wrapped as `{data: [...]}`; anything else is empty
fn items(raw: &Value, wrapped: bool) -> &[Value] {
    match raw {
        Value::Array(items) => items,
        Value::Object(obj) if wrapped => obj
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// String field; numbers are rendered, empty strings are absent
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    MetricValue::from_json(obj.get(key)?)?.as_f64()
}

/// SPARQL binding value: either `{value: ".."}` or a bare string
fn binding(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Object(b) => text(b, "value"),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

fn unix_to_rfc3339(value: &Value) -> Option<String> {
    let secs = value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))?;
    chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339())
}

fn metric_map(obj: Option<&Map<String, Value>>) -> MetricMap {
    obj.map(|o| {
        o.iter()
            .filter_map(|(k, v)| MetricValue::from_json(v).map(|mv| (k.clone(), mv)))
            .collect()
    })
    .unwrap_or_default()
}

fn profile(kind: DomainKind, ticker: Ticker, raw: &Value) -> Result<ProfileRecord, NormalizationFailure> {
    let obj = expect_object(kind, raw)?;
    if obj.is_empty() {
        return Err(NormalizationFailure::SourceAbsent {
            domain: kind,
            reason: "empty profile".to_string(),
        });
    }
    Ok(ProfileRecord {
        name: text(obj, "name").unwrap_or_else(|| ticker.to_string()),
        industry: text(obj, "finnhubIndustry").or_else(|| text(obj, "industry")),
        market_cap: obj.get("marketCapitalization").and_then(MetricValue::from_json),
        website: text(obj, "weburl"),
        ipo_date: text(obj, "ipo"),
        ticker,
    })
}

fn statement_period(obj: &Map<String, Value>) -> StatementPeriod {
    let report = obj.get("report").and_then(Value::as_object);
    let lines = |key: &str| -> Vec<StatementLine> {
        report
            .and_then(|r| r.get(key))
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_object)
                    .map(|l| StatementLine {
                        concept: text(l, "concept"),
                        label: text(l, "label"),
                        value: l.get("value").and_then(MetricValue::from_json),
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    StatementPeriod {
        end_date: text(obj, "endDate"),
        accepted_date: text(obj, "acceptedDate"),
        form: text(obj, "form"),
        year: text(obj, "year"),
        balance_sheet: lines("bs"),
        cash_flow: lines("cf"),
        income_statement: lines("ic"),
    }
}

fn rdf_graph(ticker: Ticker, obj: &Map<String, Value>) -> RdfGraphRecord {
    let list = |key: &str| obj.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);

    let nodes = list("nodes")
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|n| {
            let id = text(n, "id")?;
            let label = text(n, "label").unwrap_or_else(|| id.clone());
            Some(RdfNode { id, label })
        })
        .collect();
    let edges = list("edges")
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|e| {
            Some(RdfEdge {
                from: text(e, "from")?,
                to: text(e, "to")?,
                label: text(e, "label").unwrap_or_default(),
            })
        })
        .collect();

    RdfGraphRecord { ticker, nodes, edges }
}

/// First mapping of the first result: `[{data: [{figi, ..}]}]`
fn figi(kind: DomainKind, ticker: Ticker, raw: &Value) -> Result<FigiRecord, NormalizationFailure> {
    let first = match raw {
        Value::Array(results) => results.first(),
        other => Some(other),
    };
    let Some(result) = first.and_then(Value::as_object) else {
        return Err(NormalizationFailure::Malformed {
            domain: kind,
            expected: "a mapping result object",
        });
    };
    if let Some(reason) = text(result, "warning").or_else(|| text(result, "error")) {
        return Err(NormalizationFailure::SourceAbsent { domain: kind, reason });
    }

    let mapping = match result.get("data").and_then(Value::as_array) {
        Some(data) => data.first().and_then(Value::as_object),
        None => Some(result),
    };
    let figi = mapping.and_then(|m| text(m, "figi"));
    match (mapping, figi) {
        (Some(m), Some(figi)) => Ok(FigiRecord {
            name: text(m, "name").unwrap_or_else(|| ticker.to_string()),
            security_description: text(m, "securityDescription"),
            figi,
            ticker,
        }),
        _ => Err(NormalizationFailure::SourceAbsent {
            domain: kind,
            reason: "no FIGI mapping".to_string(),
        }),
    }
}

fn competitor(value: &Value) -> Option<Competitor> {
    match value {
        Value::String(s) if !s.is_empty() => Some(Competitor {
            name: s.clone(),
            ticker: Some(s.clone()),
            figi: None,
        }),
        Value::Object(o) => {
            let ticker = text(o, "ticker");
            let name = text(o, "name").or_else(|| ticker.clone())?;
            Some(Competitor {
                name,
                ticker,
                figi: text(o, "figi"),
            })
        }
        _ => None,
    }
}
