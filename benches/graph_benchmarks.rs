use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fingraph::graph::{dedupe, GraphNode, GroupTag};
use fingraph::records::DomainKind;
use fingraph::{BuildOptions, CompanyBundle, Facet, FilterSpec, GraphPipeline};
use serde_json::{json, Value};

fn company_payloads(i: usize) -> Vec<(DomainKind, Value)> {
    let news: Vec<Value> = (0..20)
        .map(|n| {
            json!({
                "title": format!("Company{} story {}", i, n),
                "publicationDate": format!("2024-01-{:02}", n % 28 + 1),
                "url": format!("https://news.example/{}/{}", i, n),
            })
        })
        .collect();
    let insider: Vec<Value> = (0..50)
        .map(|n| json!({"name": format!("Insider{}", n), "share": (n * 37) % 1000, "transactionDate": "2024-02-01"}))
        .collect();

    vec![
        (DomainKind::PerformanceOverview, json!({"1-Year Return": 12, "5-Year Return": 80})),
        (DomainKind::FinancialMetrics, json!({"PE Ratio": 18, "ROE": 1.5, "Debt": "1.2T"})),
        (
            DomainKind::Statistics,
            json!({"Valuation": {"EV": 3.1, "PEG": 2.0}, "Margins": {"Gross": 44.1}}),
        ),
        (DomainKind::NewsInsights, Value::Array(news)),
        (DomainKind::Insider, json!({ "data": insider })),
    ]
}

fn bundles(companies: usize) -> Vec<CompanyBundle> {
    (0..companies)
        .map(|i| {
            let payloads = company_payloads(i);
            CompanyBundle::from_payloads(&format!("T{}", i), payloads.iter().map(|(k, v)| (*k, v)))
        })
        .collect()
}

/// Benchmark a full build across company counts
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [1, 10, 100].iter() {
        let input = bundles(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let snapshot = GraphPipeline::build(&input, &BuildOptions::default());
                criterion::black_box(snapshot.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark a filtered build (company + facet)
fn bench_filtered_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_build");

    for size in [10, 100].iter() {
        let input = bundles(*size);
        let options = BuildOptions::default()
            .with_filter(FilterSpec::company("T0").with_group(fingraph::GroupSelector::Facet(Facet::News)));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let snapshot = GraphPipeline::build(&input, &options);
                criterion::black_box(snapshot.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark deduplication with a high duplicate ratio
fn bench_dedupe(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedupe");

    for size in [1000, 10_000].iter() {
        let nodes: Vec<GraphNode> = (0..*size)
            .map(|i| GraphNode::new(format!("N{}", i % (size / 4)), "node", GroupTag::Other))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let unique = dedupe(nodes.clone());
                criterion::black_box(unique.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_filtered_build, bench_dedupe);
criterion_main!(benches);
