//! Canonical records and the normalizer that produces them
//!
//! Each upstream domain (profile, statements, filings, insider activity,
//! news, Wikidata, performance, metrics, statistics, triples, identifier
//! mappings, dividends, competitors) is converted into one typed record
//! variant before synthesis.

mod normalize;
mod types;

pub use normalize::{normalize, DomainKind, NormalizationFailure, NormalizeResult, UnknownDomain};
pub use types::{
    CanonicalRecord, Competitor, CompetitorRecord, CompanyRecord, DividendEvent, DividendRecord,
    FigiRecord, FinancialMetricRecord, FinancialStatementRecord, InsiderRecord, InsiderTransaction,
    MetricMap, MetricValue, NewsArticle, NewsProvider, NewsRecord, PerformanceRecord, ProfileRecord,
    RdfEdge, RdfGraphRecord, RdfNode, SecFiling, SecFilingRecord, StatementLine, StatementPeriod,
    StatisticsRecord, WikidataRecord,
};
pub(crate) use types::or_na;
