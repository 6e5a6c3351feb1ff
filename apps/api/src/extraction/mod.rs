// Report extraction engine.
// Rule-based: every extractor is a pure function over the keyword-canonicalized
// report text, and a miss is an empty result, never an error.

pub mod accounts;
pub mod aggregator;
pub mod handlers;
pub mod inquiries;
pub mod normalizer;
pub mod personal_info;
pub mod public_records;
pub mod segmented;

use tracing::debug;

use crate::models::DerogatoryItem;

pub use aggregator::{group_by_kind, KindGroup};
pub use segmented::{parse_segmented, BureauAccounts};

/// Runs every extractor over the report and concatenates their findings in
/// fixed order: personal info, accounts, public records, hard inquiries.
pub fn parse(raw_text: &str) -> Vec<DerogatoryItem> {
    let text = normalizer::canonicalize_keywords(raw_text);

    let mut items = personal_info::extract_personal_info(&text);
    items.extend(accounts::extract_account_derogatories(&text));
    items.extend(public_records::extract_public_records(&text));
    items.extend(inquiries::extract_hard_inquiries(&text));

    debug!("Extracted {} derogatory items", items.len());
    items
}
