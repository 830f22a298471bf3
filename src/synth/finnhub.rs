//! Alternate-provider graph: profile, statements, filings, insider activity,
//! company news and the Wikidata enrichment fragment

use super::ids::{self, Section};
use super::{company_root, latest_articles, records_for, truncate_chars, Synthesizer};
use crate::config::SectionCaps;
use crate::graph::{GraphDraft, GroupTag, NodeDraft, NodeId, Ticker};
use crate::records::{
    or_na, CanonicalRecord, FinancialStatementRecord, InsiderRecord, NewsProvider, NewsRecord,
    ProfileRecord, SecFilingRecord, StatementLine, StatementPeriod, WikidataRecord,
};

#[derive(Debug, Clone, Default)]
pub struct FinnhubSynthesizer {
    caps: SectionCaps,
    only: Option<Section>,
}

impl FinnhubSynthesizer {
    pub fn new(caps: SectionCaps) -> Self {
        Self { caps, only: None }
    }

    /// Restrict output to a single section
    pub fn only(mut self, section: Section) -> Self {
        self.only = Some(section);
        self
    }

    fn wants(&self, section: Section) -> bool {
        self.only.map_or(true, |only| only == section)
    }

    pub(crate) fn sections(&self, root: &NodeId, records: &[&CanonicalRecord], draft: &mut GraphDraft) {
        for record in records {
            match record {
                CanonicalRecord::Profile(r) if self.wants(Section::Profile) => profile(root, r, draft),
                CanonicalRecord::FinancialStatement(r) if self.wants(Section::Financials) => {
                    self.statements(root, r, draft)
                }
                CanonicalRecord::SecFiling(r) if self.wants(Section::SecFilings) => {
                    self.filings(root, r, draft)
                }
                CanonicalRecord::Insider(r) if self.wants(Section::Insider) => self.insider(root, r, draft),
                CanonicalRecord::News(r)
                    if r.provider == NewsProvider::Finnhub && self.wants(Section::CompanyNews) =>
                {
                    self.news(root, r, draft)
                }
                CanonicalRecord::Wikidata(r) if self.wants(Section::Wikidata) => wikidata(root, r, draft),
                _ => {}
            }
        }
    }

    fn statements(&self, root: &NodeId, record: &FinancialStatementRecord, draft: &mut GraphDraft) {
        if record.periods.is_empty() {
            return;
        }
        let section = draft.add_node(
            NodeDraft::new(ids::section_id(root, Section::Financials), "Financials", GroupTag::Financials)
                .with_detail("Financial statements"),
        );
        draft.link(root, &section, "has financials");

        for (index, period) in record.periods.iter().take(self.caps.statement_periods).enumerate() {
            let period_id = self.period(&section, index, period, draft);
            let statements = [
                ("bs", "Balance Sheet", "BS", &period.balance_sheet),
                ("cf", "Cash Flow", "CF", &period.cash_flow),
                ("ic", "Income Statement", "IC", &period.income_statement),
            ];
            for (slug, title, edge, lines) in statements {
                if lines.is_empty() {
                    continue;
                }
                let statement = draft.add_node(
                    NodeDraft::new(period_id.child(slug), title, GroupTag::FinancialsItem)
                        .with_detail(format!("{} line items", title)),
                );
                draft.link(&period_id, &statement, edge);

                for (n, line) in lines.iter().take(self.caps.statement_lines).enumerate() {
                    let leaf = draft.add_node(statement_line(&statement, edge, n, line));
                    draft.link(&statement, &leaf, "item");
                }
            }
        }
    }

    fn period(&self, section: &NodeId, index: usize, period: &StatementPeriod, draft: &mut GraphDraft) -> NodeId {
        let label = match period.end_date.as_deref() {
            Some(end) => format!("Period: {}", truncate_chars(end, 10)),
            None => format!("Period {}", index + 1),
        };
        let detail = format!(
            "End Date: {}\nAccepted Date: {}\nForm: {}\nYear: {}",
            or_na(period.end_date.as_deref()),
            or_na(period.accepted_date.as_deref()),
            or_na(period.form.as_deref()),
            or_na(period.year.as_deref()),
        );
        let id = draft.add_node(
            NodeDraft::new(ids::ordinal_id(section, "period", index), label, GroupTag::FinancialsItem)
                .with_detail(detail),
        );
        draft.link(section, &id, "statement");
        id
    }

    fn filings(&self, root: &NodeId, record: &SecFilingRecord, draft: &mut GraphDraft) {
        if record.filings.is_empty() {
            return;
        }
        let section = draft.add_node(
            NodeDraft::new(ids::section_id(root, Section::SecFilings), "SEC Filings", GroupTag::Filings)
                .with_detail("List of SEC filings"),
        );
        draft.link(root, &section, "has filings");

        for (index, filing) in record.filings.iter().take(self.caps.filings).enumerate() {
            let label = match filing.form.as_deref() {
                Some(form) => format!("Form: {}", form),
                None => format!("Filing {}", index + 1),
            };
            let detail = format!(
                "Form: {}\nFiled Date: {}\nAccepted Date: {}\nURL: {}",
                or_na(filing.form.as_deref()),
                or_na(filing.filed_date.as_deref()),
                or_na(filing.accepted_date.as_deref()),
                or_na(filing.url.as_deref()),
            );
            let leaf = draft.add_node(
                NodeDraft::new(ids::ordinal_id(&section, "filing", index), label, GroupTag::FilingsItem)
                    .with_detail(detail),
            );
            draft.link(&section, &leaf, "filing");
        }
    }

    fn insider(&self, root: &NodeId, record: &InsiderRecord, draft: &mut GraphDraft) {
        if record.transactions.is_empty() {
            return;
        }
        let section = draft.add_node(
            NodeDraft::new(ids::section_id(root, Section::Insider), "Insider Transactions", GroupTag::Insider)
                .with_detail("Insider transactions"),
        );
        draft.link(root, &section, "has insider data");

        let mut sorted: Vec<_> = record.transactions.iter().collect();
        sorted.sort_by(|a, b| b.share_count().total_cmp(&a.share_count()));

        for (index, tx) in sorted.into_iter().take(self.caps.insider).enumerate() {
            let label = format!(
                "{} ({})",
                or_na(tx.name.as_deref()),
                or_na(tx.transaction_date.as_deref())
            );
            let detail = format!(
                "Name: {}\nTransaction Date: {}\nFiling Date: {}\nShares: {}\nChange: {}\nTransaction Price: {}\nCode: {}",
                or_na(tx.name.as_deref()),
                or_na(tx.transaction_date.as_deref()),
                or_na(tx.filing_date.as_deref()),
                number_or_na(tx.shares),
                number_or_na(tx.change),
                number_or_na(tx.price),
                or_na(tx.code.as_deref()),
            );
            let leaf = draft.add_node(
                NodeDraft::new(ids::ordinal_id(&section, "item", index), label, GroupTag::InsiderItem)
                    .with_detail(detail),
            );
            draft.link(&section, &leaf, "transaction");
        }
    }

    fn news(&self, root: &NodeId, record: &NewsRecord, draft: &mut GraphDraft) {
        if record.articles.is_empty() {
            return;
        }
        let section = draft.add_node(
            NodeDraft::new(ids::section_id(root, Section::CompanyNews), "News", GroupTag::News)
                .with_detail("Recent company news"),
        );
        draft.link(root, &section, "has news");

        for (index, article) in latest_articles(&record.articles, self.caps.news).into_iter().enumerate() {
            let label = match article.title.as_deref() {
                Some(headline) if !headline.is_empty() => truncate_chars(headline, 30).to_string(),
                _ => format!("Article {}", index + 1),
            };
            let detail = format!(
                "Headline: {}\nDate: {}\nSource: {}\nURL: {}",
                or_na(article.title.as_deref()),
                or_na(article.published_at.as_deref()),
                or_na(article.source.as_deref()),
                or_na(article.url.as_deref()),
            );
            let leaf = draft.add_node(
                NodeDraft::new(ids::ordinal_id(&section, "article", index), label, GroupTag::NewsItem)
                    .with_detail(detail),
            );
            draft.link(&section, &leaf, "article");
        }
    }
}

impl Synthesizer for FinnhubSynthesizer {
    fn synthesize(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> GraphDraft {
        let records = records_for(ticker, records);
        let mut draft = GraphDraft::new();
        let root = draft.add_node(company_root(ticker, &records));
        self.sections(&root, &records, &mut draft);
        draft
    }
}

fn profile(root: &NodeId, record: &ProfileRecord, draft: &mut GraphDraft) {
    let section = draft.add_node(
        NodeDraft::new(ids::section_id(root, Section::Profile), "Profile", GroupTag::Profile)
            .with_detail("Company profile"),
    );
    draft.link(root, &section, "has profile");

    let market_cap = record.market_cap.as_ref().map(|v| v.to_string());
    let fields = [
        ("Industry", record.industry.as_deref()),
        ("Market Cap", market_cap.as_deref()),
        ("Website", record.website.as_deref()),
        ("IPO", record.ipo_date.as_deref()),
    ];
    for (index, (name, value)) in fields.into_iter().enumerate() {
        let value = or_na(value);
        let leaf = draft.add_node(
            NodeDraft::new(ids::ordinal_id(&section, "item", index), format!("{}: {}", name, value), GroupTag::Profile)
                .with_detail(format!("{}\n{}", name, value)),
        );
        draft.link(&section, &leaf, "field");
    }
}

fn statement_line(statement: &NodeId, kind: &str, index: usize, line: &StatementLine) -> NodeDraft {
    let label = line
        .label
        .clone()
        .unwrap_or_else(|| format!("{} Item {}", kind, index + 1));
    let value = line.value.as_ref().map(|v| v.to_string());
    let detail = format!(
        "Concept: {}\nLabel: {}\nValue: {}",
        or_na(line.concept.as_deref()),
        or_na(line.label.as_deref()),
        or_na(value.as_deref()),
    );
    NodeDraft::new(ids::ordinal_id(statement, "line", index), label, GroupTag::FinancialsItem).with_detail(detail)
}

fn wikidata(root: &NodeId, record: &WikidataRecord, draft: &mut GraphDraft) {
    if record.headquarters.is_none() && record.inception_date.is_none() {
        return;
    }
    let section = draft.add_node(
        NodeDraft::new(ids::section_id(root, Section::Wikidata), "Wikidata", GroupTag::Wikidata)
            .with_detail("Additional data from Wikidata"),
    );
    draft.link(root, &section, "enriched by");

    if let Some(hq) = record.headquarters.as_deref() {
        let leaf = draft.add_node(
            NodeDraft::new(section.child("hq"), format!("HQ: {}", hq), GroupTag::WikidataItem)
                .with_detail(format!("Headquarters: {}", hq)),
        );
        draft.link(&section, &leaf, "headquarters");
    }
    if let Some(inception) = record.inception_date.as_deref() {
        let leaf = draft.add_node(
            NodeDraft::new(
                section.child("inception"),
                format!("Inception: {}", truncate_chars(inception, 10)),
                GroupTag::WikidataItem,
            )
            .with_detail(format!("Inception date: {}", inception)),
        );
        draft.link(&section, &leaf, "inception");
    }
}

fn number_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |n| n.to_string())
}
