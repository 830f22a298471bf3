//! Identifier-enriched view rooted at a FIGI

use super::ids::{self, Section};
use super::{company_root, records_for, Synthesizer};
use crate::graph::{GraphDraft, GroupTag, NodeDraft, NodeId, Ticker};
use crate::records::{or_na, CanonicalRecord, CompetitorRecord, DividendRecord, FigiRecord, WikidataRecord};

#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichedSynthesizer;

impl EnrichedSynthesizer {
    pub fn new() -> Self {
        EnrichedSynthesizer
    }
}

fn figi_record<'a>(records: &[&'a CanonicalRecord]) -> Option<&'a FigiRecord> {
    records.iter().find_map(|r| match *r {
        CanonicalRecord::Figi(f) => Some(f),
        _ => None,
    })
}

impl Synthesizer for EnrichedSynthesizer {
    fn synthesize(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> GraphDraft {
        let records = records_for(ticker, records);
        let mut draft = GraphDraft::new();

        let root = match figi_record(&records) {
            Some(figi) => draft.add_node(
                NodeDraft::new(figi.figi.as_str(), figi.name.as_str(), GroupTag::Company).with_detail(format!(
                    "Company: {}\nTicker: {}\nDescription: {}",
                    figi.name,
                    figi.ticker,
                    or_na(figi.security_description.as_deref())
                )),
            ),
            None => {
                tracing::debug!(ticker = %ticker, "no FIGI mapping, rooting at ticker");
                draft.add_node(company_root(ticker, &records))
            }
        };
        let label = draft.nodes[0].label.clone();

        for record in &records {
            match record {
                CanonicalRecord::Wikidata(r) => {
                    profile(&root, r, &mut draft);
                    semantic(&root, &label, ticker, &mut draft);
                }
                CanonicalRecord::Dividend(r) => dividend(&root, r, &mut draft),
                CanonicalRecord::Competitor(r) => competitors(&root, r, &mut draft),
                _ => {}
            }
        }
        draft
    }

    fn root_id(&self, ticker: &Ticker, records: &[CanonicalRecord]) -> NodeId {
        figi_record(&records_for(ticker, records))
            .map(|f| NodeId::new(f.figi.as_str()))
            .unwrap_or_else(|| ticker.root_id())
    }
}

fn profile(root: &NodeId, record: &WikidataRecord, draft: &mut GraphDraft) {
    let detail = format!(
        "Headquarters: {}\nFounding Date: {}\nIndustry: {}",
        or_na(record.headquarters.as_deref()),
        or_na(record.inception_date.as_deref()),
        or_na(record.industry.as_deref()),
    );
    let id = draft.add_node(
        NodeDraft::new(ids::section_id(root, Section::Profile), "Company Profile", GroupTag::Profile)
            .with_detail(detail),
    );
    draft.link(root, &id, "has profile");
}

fn semantic(root: &NodeId, label: &str, ticker: &Ticker, draft: &mut GraphDraft) {
    let id = draft.add_node(
        NodeDraft::new(ids::section_id(root, Section::Semantic), "Semantic Annotations", GroupTag::Semantic)
            .with_detail(format!(
                "Annotated with Schema.org & FOAF\nCompany: {}\nTicker: {}",
                label, ticker
            )),
    );
    draft.link(root, &id, "annotated as");
}

/// Only the most recent event is shown
fn dividend(root: &NodeId, record: &DividendRecord, draft: &mut GraphDraft) {
    let Some(last) = record.events.first() else {
        return;
    };
    let amount = last.amount.as_ref().map(|v| v.to_string());
    let dividend_yield = last.dividend_yield.as_ref().map(|v| v.to_string());
    let id = draft.add_node(
        NodeDraft::new(
            ids::section_id(root, Section::Dividend),
            "Dividend & Corporate Actions",
            GroupTag::Dividend,
        )
        .with_detail(format!(
            "Dividend Yield: {}\nLast Dividend: {} on {}",
            or_na(dividend_yield.as_deref()),
            or_na(amount.as_deref()),
            or_na(last.payment_date.as_deref()),
        )),
    );
    draft.link(root, &id, "has dividend");
}

fn competitors(root: &NodeId, record: &CompetitorRecord, draft: &mut GraphDraft) {
    for (index, competitor) in record.competitors.iter().enumerate() {
        let id = draft.add_node(
            NodeDraft::new(ids::competitor_id(root, index), competitor.name.as_str(), GroupTag::Competitor)
                .with_detail(format!(
                    "Ticker: {}\nFIGI: {}",
                    or_na(competitor.ticker.as_deref()),
                    or_na(competitor.figi.as_deref())
                )),
        );
        draft.link(root, &id, "competes with");
    }
}
