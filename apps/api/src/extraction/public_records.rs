use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DerogatoryItem, ItemKind};

static BANKRUPTCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)BANKRUPTCY:[ \t]*(.*?)\s*Date(?: Filed)?:[ \t]*(\d{2}/\d{2}/\d{4}).*?Case #:[ \t]*([^|\n]+)",
    )
    .unwrap()
});

/// Emits a single `BANKRUPTCY` item for the first labelled bankruptcy section.
pub fn extract_public_records(text: &str) -> Vec<DerogatoryItem> {
    let Some(caps) = BANKRUPTCY.captures(text) else {
        return Vec::new();
    };

    let description = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
    let case_number = caps[3].trim();
    let details = if description.is_empty() {
        format!("Case #{case_number}")
    } else {
        format!("{description} (Case #{case_number})")
    };

    vec![DerogatoryItem::new(ItemKind::Bankruptcy, details).with_date(Some(caps[2].to_string()))]
}
