/// Triple-service and identifier-enriched builds: label-based grouping,
/// shared summary nodes, FIGI roots and pruning of unknown endpoints.
use fingraph::records::DomainKind;
use fingraph::{
    BuildOptions, CompanyBundle, FilterSpec, GraphPipeline, GroupTag, RdfView, SynthesisMode,
};
use serde_json::{json, Value};

fn rdf_payload() -> Value {
    json!({
        "nodes": [
            {"id": "ex:Company_AAPL", "label": "AAPL"},
            {"id": "ex:AAPL_PE", "label": "PE Ratio"},
            {"id": "ex:AAPL_Revenue", "label": "Revenue"},
            {"id": "ex:AAPL_PerformanceOverview", "label": "1-Year Return"},
            {"id": "ex:AAPL_NewsArticle_1", "label": "News item"},
            {"id": "ex:AAPL_Blog", "label": "Tech Blog"},
            {"id": "ex:AAPL_Misc", "label": "Cupertino"}
        ],
        "edges": [
            {"from": "ex:Company_AAPL", "to": "ex:AAPL_PE", "label": "hasMetric"},
            {"from": "ex:Company_AAPL", "to": "ex:AAPL_Revenue", "label": "hasMetric"},
            {"from": "ex:AAPL_Revenue", "to": "391035000000", "label": "metricValue"},
            {"from": "ex:AAPL_PerformanceOverview", "to": "12.3", "label": "cpiReturn"},
            {"from": "ex:AAPL_NewsArticle_1", "to": "Apple beats estimates", "label": "headline"},
            {"from": "ex:Company_AAPL", "to": "ex:AAPL_Misc", "label": "locatedIn"}
        ]
    })
}

fn rdf_bundle() -> CompanyBundle {
    let payload = rdf_payload();
    CompanyBundle::from_payloads("AAPL", [(DomainKind::RdfGraph, &payload)])
}

fn rdf_options(view: RdfView) -> BuildOptions {
    BuildOptions::default().with_mode(SynthesisMode::Rdf(view))
}

#[test]
fn test_detailed_view_infers_groups() {
    let snapshot = GraphPipeline::build(&[rdf_bundle()], &rdf_options(RdfView::Detailed));

    let group = |id: &str| snapshot.get_node(id).unwrap().group;
    assert_eq!(group("ex:Company_AAPL"), GroupTag::Company);
    assert_eq!(group("ex:AAPL_PE"), GroupTag::Financial);
    assert_eq!(group("ex:AAPL_PerformanceOverview"), GroupTag::Performance);
    assert_eq!(group("ex:AAPL_NewsArticle_1"), GroupTag::News);
    assert_eq!(group("ex:AAPL_Blog"), GroupTag::News);
    assert_eq!(group("ex:AAPL_Misc"), GroupTag::Other);
    assert_eq!(group("ex:AAPL_Revenue"), GroupTag::Other);

    // literal targets are not nodes, so their edges are pruned
    assert_eq!(snapshot.edge_count(), 3);
    assert_eq!(
        snapshot.get_node("ex:AAPL_PE").unwrap().detail.as_deref(),
        Some("Details: PE Ratio")
    );
}

#[test]
fn test_simplified_view_summaries() {
    let snapshot = GraphPipeline::build(&[rdf_bundle()], &rdf_options(RdfView::Simplified));

    let summaries: Vec<&str> = snapshot
        .nodes_in_group(GroupTag::Summary)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(summaries, ["financial-metrics", "performance", "news"]);

    assert_eq!(
        snapshot.get_node("ex:AAPL_Revenue").unwrap().label,
        "Revenue: 391035000000"
    );
    assert_eq!(
        snapshot.get_node("ex:AAPL_PerformanceOverview").unwrap().label,
        "1-Year Return: 12.3%"
    );
    assert_eq!(
        snapshot.get_node("ex:AAPL_NewsArticle_1").unwrap().label,
        "Apple beats estimates"
    );
    assert!(snapshot.get_node("ex:AAPL_PE").is_none());
    assert!(snapshot.get_node("ex:AAPL_Misc").is_none());

    let labels: Vec<&str> = snapshot
        .outgoing("ex:Company_AAPL")
        .iter()
        .filter_map(|e| e.label.as_deref())
        .collect();
    assert_eq!(labels, ["hasMetrics", "hasPerformance", "hasNews"]);
}

#[test]
fn test_simplified_summaries_are_shared_across_companies() {
    let msft = json!({
        "nodes": [{"id": "ex:Company_MSFT", "label": "MSFT"}, {"id": "ex:MSFT_Debt", "label": "Debt"}],
        "edges": []
    });
    let bundles = vec![
        rdf_bundle(),
        CompanyBundle::from_payloads("MSFT", [(DomainKind::RdfGraph, &msft)]),
    ];
    let snapshot = GraphPipeline::build(&bundles, &rdf_options(RdfView::Simplified));

    let metrics_hubs = snapshot.nodes().iter().filter(|n| n.id == "financial-metrics").count();
    assert_eq!(metrics_hubs, 1);
    assert_eq!(snapshot.get_node("ex:MSFT_Debt").unwrap().label, "Debt: ");
    assert_eq!(snapshot.outgoing("financial-metrics").len(), 2);
}

#[test]
fn test_rdf_without_company_node_gets_ticker_root() {
    let payload = json!({"nodes": [{"id": "ex:X_Revenue", "label": "Revenue"}], "edges": []});
    let bundle = CompanyBundle::from_payloads("XYZ", [(DomainKind::RdfGraph, &payload)]);
    let snapshot = GraphPipeline::build(&[bundle], &rdf_options(RdfView::Simplified));

    let root = snapshot.get_node("XYZ").unwrap();
    assert_eq!(root.group, GroupTag::Company);
    assert_eq!(snapshot.outgoing("XYZ").len(), 1);
}

#[test]
fn test_enriched_mode_rooted_at_figi() {
    let figi = json!([{"data": [{"figi": "BBG000B9XRY4", "name": "APPLE INC", "ticker": "AAPL", "securityDescription": "AAPL"}]}]);
    let wikidata = json!({"hqLabel": {"value": "Cupertino"}, "foundingDate": {"value": "1976-04-01"}, "industryLabel": {"value": "consumer electronics"}});
    let dividend = json!([{"amount": 0.25, "paymentDate": "2024-05-16", "dividendYield": "0.5%"}]);
    let competitors = json!(["MSFT", {"name": "Alphabet Inc", "ticker": "GOOGL", "figi": "BBG009S39JX6"}]);
    let bundle = CompanyBundle::from_payloads(
        "AAPL",
        [
            (DomainKind::FigiMapping, &figi),
            (DomainKind::Wikidata, &wikidata),
            (DomainKind::Dividends, &dividend),
            (DomainKind::Competitors, &competitors),
        ],
    );

    let options = BuildOptions::default().with_mode(SynthesisMode::Enriched);
    let snapshot = GraphPipeline::build(std::slice::from_ref(&bundle), &options);

    assert_eq!(snapshot.nodes()[0].id, "BBG000B9XRY4");
    assert_eq!(snapshot.nodes()[0].label, "APPLE INC");
    assert_eq!(snapshot.nodes_in_group(GroupTag::Competitor).len(), 2);
    assert_eq!(
        snapshot.get_node("BBG000B9XRY4_profile").unwrap().detail.as_deref(),
        Some("Headquarters: Cupertino\nFounding Date: 1976-04-01\nIndustry: consumer electronics")
    );
    assert!(snapshot.get_node("BBG000B9XRY4_semantic").is_some());
    assert!(snapshot.get_node("BBG000B9XRY4_dividend").is_some());

    let by_figi = options.clone().with_filter(FilterSpec::company("BBG000B9XRY4"));
    let filtered = GraphPipeline::build(&[bundle], &by_figi);
    assert_eq!(filtered.node_count(), snapshot.node_count());
}
