//! Request tagging and snapshot publication
//!
//! Raw payloads arrive asynchronously, one per (ticker, domain), in any
//! order. Every request is stamped with the selection generation it was
//! issued for; a response whose generation is no longer current is
//! discarded instead of overwriting fresher state. Builds run on a copy of
//! the held payloads and the result replaces the published snapshot in a
//! single swap. Every change to the held payloads bumps a revision, and a
//! build never replaces a snapshot built from a later revision.

use crate::config::BuildConfig;
use crate::graph::{FilterSpec, GraphSnapshot};
use crate::pipeline::{BuildOptions, CompanyBundle, GraphPipeline};
use crate::records::DomainKind;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// What the user is currently looking at
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub tickers: Vec<String>,
    pub filter: FilterSpec,
}

impl Selection {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection {
            tickers: tickers.into_iter().map(Into::into).collect(),
            filter: FilterSpec::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }
}

/// Stamp carried by one in-flight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub generation: u64,
    pub ticker: String,
    pub domain: DomainKind,
}

struct SessionState {
    generation: u64,
    /// Bumped on every selection change and accepted payload
    revision: u64,
    /// Revision the published snapshot was built from
    published_revision: u64,
    selection: Selection,
    /// ticker -> domain -> raw payload; domains kept sorted so the build
    /// does not depend on arrival order
    payloads: IndexMap<String, BTreeMap<DomainKind, Value>>,
    published: Arc<GraphSnapshot>,
}

/// Shared graph state for one viewer
pub struct GraphSession {
    config: BuildConfig,
    state: RwLock<SessionState>,
}

impl GraphSession {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            state: RwLock::new(SessionState {
                generation: 0,
                revision: 0,
                published_revision: 0,
                selection: Selection::default(),
                payloads: IndexMap::new(),
                published: Arc::new(GraphSnapshot::empty()),
            }),
        }
    }

    /// Replace the selection; returns the new generation
    pub async fn select(&self, selection: Selection) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.revision += 1;
        state.payloads.clear();
        state.selection = selection;
        debug!(generation = state.generation, tickers = ?state.selection.tickers, "selection changed");
        state.generation
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Stamp a request about to be issued
    pub async fn tag(&self, ticker: impl Into<String>, domain: DomainKind) -> RequestTag {
        RequestTag {
            generation: self.state.read().await.generation,
            ticker: ticker.into(),
            domain,
        }
    }

    /// Hold `payload` if `tag` still matches the selection
    pub async fn accept(&self, tag: &RequestTag, payload: Value) -> bool {
        let mut state = self.state.write().await;
        if tag.generation != state.generation || !state.selection.contains(&tag.ticker) {
            warn!(
                ticker = %tag.ticker,
                domain = %tag.domain,
                tag_generation = tag.generation,
                current = state.generation,
                "discarding stale response"
            );
            return false;
        }
        state
            .payloads
            .entry(tag.ticker.clone())
            .or_default()
            .insert(tag.domain, payload);
        state.revision += 1;
        true
    }

    /// Build from the held payloads and publish the result
    ///
    /// If the selection changes while the build runs, or a build of newer
    /// payloads was published meanwhile, the result is dropped and the
    /// previously published snapshot is returned.
    pub async fn publish(&self) -> Arc<GraphSnapshot> {
        let pending = self.pending().await;
        let snapshot = pending.build();
        self.install(&pending, snapshot).await
    }

    /// Copy what a build needs out of the shared state
    async fn pending(&self) -> PendingBuild {
        let state = self.state.read().await;
        let bundles: Vec<CompanyBundle> = state
            .selection
            .tickers
            .iter()
            .map(|ticker| match state.payloads.get(ticker) {
                Some(domains) => {
                    CompanyBundle::from_payloads(ticker, domains.iter().map(|(kind, raw)| (*kind, raw)))
                }
                None => CompanyBundle::from_payloads(ticker, std::iter::empty()),
            })
            .collect();
        PendingBuild {
            generation: state.generation,
            revision: state.revision,
            bundles,
            options: BuildOptions::from(self.config.clone()).with_filter(state.selection.filter.clone()),
        }
    }

    async fn install(&self, pending: &PendingBuild, snapshot: GraphSnapshot) -> Arc<GraphSnapshot> {
        let mut state = self.state.write().await;
        if state.generation != pending.generation {
            debug!(built = pending.generation, current = state.generation, "dropping superseded build");
            return state.published.clone();
        }
        if pending.revision < state.published_revision {
            debug!(
                built = pending.revision,
                published = state.published_revision,
                "dropping build older than the published snapshot"
            );
            return state.published.clone();
        }

        let snapshot = Arc::new(snapshot);
        state.published = snapshot.clone();
        state.published_revision = pending.revision;
        info!(
            generation = pending.generation,
            revision = pending.revision,
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            "published snapshot"
        );
        snapshot
    }

    /// Last published snapshot
    pub async fn current(&self) -> Arc<GraphSnapshot> {
        self.state.read().await.published.clone()
    }
}

/// Inputs of one build, detached from the session lock
struct PendingBuild {
    generation: u64,
    revision: u64,
    bundles: Vec<CompanyBundle>,
    options: BuildOptions,
}

impl PendingBuild {
    fn build(&self) -> GraphSnapshot {
        GraphPipeline::build(&self.bundles, &self.options)
    }
}

impl Default for GraphSession {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Facet, GroupTag};
    use serde_json::json;

    #[tokio::test]
    async fn test_accept_and_publish() {
        let session = GraphSession::default();
        session.select(Selection::new(["AAPL"])).await;

        let tag = session.tag("AAPL", DomainKind::PerformanceOverview).await;
        assert!(session.accept(&tag, json!({"1-Year Return": 12})).await);
        let tag = session.tag("AAPL", DomainKind::FinancialMetrics).await;
        assert!(session.accept(&tag, json!({"PE Ratio": 18})).await);

        let snapshot = session.publish().await;
        assert_eq!(snapshot.node_count(), 5);
        assert_eq!(session.current().await.node_count(), 5);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let session = GraphSession::default();
        session.select(Selection::new(["AAPL"])).await;
        let stale = session.tag("AAPL", DomainKind::PerformanceOverview).await;

        session.select(Selection::new(["MSFT"])).await;
        assert!(!session.accept(&stale, json!({"1-Year Return": 12})).await);

        let snapshot = session.publish().await;
        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(snapshot.nodes()[0].id, "MSFT");
    }

    #[tokio::test]
    async fn test_unselected_ticker_is_rejected() {
        let session = GraphSession::default();
        session.select(Selection::new(["AAPL"])).await;
        let tag = session.tag("TSLA", DomainKind::Profile).await;
        assert!(!session.accept(&tag, json!({"name": "Tesla"})).await);
    }

    #[tokio::test]
    async fn test_arrival_order_does_not_matter() {
        let payloads = [
            (DomainKind::FinancialMetrics, json!({"PE Ratio": 18})),
            (DomainKind::PerformanceOverview, json!({"1-Year Return": 12})),
        ];

        let forward = GraphSession::default();
        forward.select(Selection::new(["AAPL"])).await;
        for (domain, raw) in payloads.iter() {
            let tag = forward.tag("AAPL", *domain).await;
            forward.accept(&tag, raw.clone()).await;
        }

        let backward = GraphSession::default();
        backward.select(Selection::new(["AAPL"])).await;
        for (domain, raw) in payloads.iter().rev() {
            let tag = backward.tag("AAPL", *domain).await;
            backward.accept(&tag, raw.clone()).await;
        }

        assert_eq!(*forward.publish().await, *backward.publish().await);
    }

    #[tokio::test]
    async fn test_selection_filter_applies() {
        let session = GraphSession::default();
        session
            .select(Selection::new(["AAPL"]).with_filter(FilterSpec::facet(Facet::Performance)))
            .await;
        let tag = session.tag("AAPL", DomainKind::FinancialMetrics).await;
        session.accept(&tag, json!({"PE Ratio": 18})).await;

        let snapshot = session.publish().await;
        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(snapshot.nodes()[0].group, GroupTag::Company);
    }

    #[tokio::test]
    async fn test_older_build_never_replaces_newer_one() {
        let session = GraphSession::default();
        session.select(Selection::new(["AAPL"])).await;
        let tag = session.tag("AAPL", DomainKind::PerformanceOverview).await;
        session.accept(&tag, json!({"1-Year Return": 12})).await;

        let early = session.pending().await;
        let tag = session.tag("AAPL", DomainKind::FinancialMetrics).await;
        session.accept(&tag, json!({"PE Ratio": 18})).await;
        let late = session.pending().await;

        // the later build finishes first
        let published = session.install(&late, late.build()).await;
        assert_eq!(published.node_count(), 5);

        let kept = session.install(&early, early.build()).await;
        assert_eq!(kept.node_count(), 5);
        assert_eq!(session.current().await.node_count(), 5);
    }

    #[tokio::test]
    async fn test_build_from_previous_selection_is_dropped() {
        let session = GraphSession::default();
        session.select(Selection::new(["AAPL"])).await;
        let before = session.pending().await;

        session.select(Selection::new(["MSFT"])).await;
        let kept = session.install(&before, before.build()).await;
        assert_eq!(kept.node_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_accepts() {
        let session = Arc::new(GraphSession::default());
        session.select(Selection::new(["AAPL", "MSFT"])).await;

        let mut handles = Vec::new();
        for ticker in ["AAPL", "MSFT"] {
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                let tag = session.tag(ticker, DomainKind::FinancialMetrics).await;
                session.accept(&tag, json!({"PE Ratio": 18})).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let snapshot = session.publish().await;
        assert_eq!(snapshot.node_count(), 6);
    }
}
