//! Fingraph CLI: build a company graph snapshot from a bundle file
//!
//! A bundle file maps tickers to raw per-domain payloads:
//! `{"AAPL": {"profile": {..}, "news_insights": [..]}, ..}`

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use fingraph::records::DomainKind;
use fingraph::{
    load_bundles, BuildConfig, BuildOptions, CompanySelector, FilterSpec, GraphSnapshot, GroupSelector, RdfView,
    Section, SynthesisMode,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fingraph", version, about = "Company graph builder")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Combined,
    Financial,
    Finnhub,
    Profile,
    Financials,
    Sec,
    Insider,
    News,
    Wikidata,
    RdfDetailed,
    RdfSimplified,
    Enriched,
}

impl From<ModeArg> for SynthesisMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Combined => SynthesisMode::Combined,
            ModeArg::Financial => SynthesisMode::Financial,
            ModeArg::Finnhub => SynthesisMode::Finnhub,
            ModeArg::Profile => SynthesisMode::FinnhubSection(Section::Profile),
            ModeArg::Financials => SynthesisMode::FinnhubSection(Section::Financials),
            ModeArg::Sec => SynthesisMode::FinnhubSection(Section::SecFilings),
            ModeArg::Insider => SynthesisMode::FinnhubSection(Section::Insider),
            ModeArg::News => SynthesisMode::FinnhubSection(Section::CompanyNews),
            ModeArg::Wikidata => SynthesisMode::FinnhubSection(Section::Wikidata),
            ModeArg::RdfDetailed => SynthesisMode::Rdf(RdfView::Detailed),
            ModeArg::RdfSimplified => SynthesisMode::Rdf(RdfView::Simplified),
            ModeArg::Enriched => SynthesisMode::Enriched,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a snapshot from a bundle file
    Build {
        /// Path to the bundle JSON
        bundle: PathBuf,

        /// Synthesis mode (overrides the config file)
        #[arg(long)]
        mode: Option<ModeArg>,

        /// Company root to keep, or "All"
        #[arg(long, default_value = "All")]
        company: String,

        /// Facet or group to keep, or "All"
        #[arg(long, default_value = "All")]
        group: String,

        /// Disable clustering rules
        #[arg(long)]
        no_cluster: bool,

        /// YAML build configuration
        #[arg(long, env = "FINGRAPH_CONFIG")]
        config: Option<PathBuf>,
    },
    /// List the domain keys a bundle may contain
    Domains,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build {
            bundle,
            mode,
            company,
            group,
            no_cluster,
            config,
        } => run_build(&bundle, mode, &company, &group, no_cluster, config.as_deref(), &cli.format),
        Commands::Domains => {
            run_domains();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_build(
    bundle: &std::path::Path,
    mode: Option<ModeArg>,
    company: &str,
    group: &str,
    no_cluster: bool,
    config: Option<&std::path::Path>,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => BuildConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BuildConfig::default(),
    };

    let filter = FilterSpec {
        company: company.parse::<CompanySelector>().context("invalid --company")?,
        group: group.parse::<GroupSelector>().context("invalid --group")?,
    };

    let mut options = BuildOptions::from(config).with_filter(filter);
    if let Some(mode) = mode {
        options = options.with_mode(mode.into());
    }
    if no_cluster {
        options = options.without_clustering();
    }

    let bundles = load_bundles(bundle).with_context(|| format!("reading bundle {}", bundle.display()))?;
    let snapshot = fingraph::GraphPipeline::build(&bundles, &options);

    match format {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Csv => print_csv(&snapshot),
        OutputFormat::Table => print_table(&snapshot),
    }
    Ok(())
}

fn print_table(snapshot: &GraphSnapshot) {
    if snapshot.node_count() == 0 {
        println!("(empty graph)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["id", "label", "group"]);
    for node in snapshot.nodes() {
        table.add_row(vec![node.id.to_string(), node.label.clone(), node.group.to_string()]);
    }
    println!("{}", table);

    let mut groups = Table::new();
    groups.set_header(vec!["group", "nodes"]);
    for (group, count) in snapshot.group_counts() {
        groups.add_row(vec![group.to_string(), count.to_string()]);
    }
    println!("{}", groups);
    println!(
        "{} node(s), {} edge(s), {} cluster(s)",
        snapshot.node_count(),
        snapshot.edge_count(),
        snapshot.clusters().len()
    );
}

fn print_csv(snapshot: &GraphSnapshot) {
    println!("id,label,group");
    for node in snapshot.nodes() {
        println!(
            "{},{},{}",
            csv_field(node.id.as_str()),
            csv_field(&node.label),
            node.group
        );
    }
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn run_domains() {
    let mut table = Table::new();
    table.set_header(vec!["key", "domain"]);
    for kind in DomainKind::ALL {
        table.add_row(vec![kind.wire_key().to_string(), format!("{:?}", kind)]);
    }
    println!("{}", table);
}
