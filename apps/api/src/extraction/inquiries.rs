use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DerogatoryItem, ItemKind};

/// `Inquiries` heading, the three-column table header, then rows up to the
/// next blank line.
static INQUIRY_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?is)Inquiries.*?Creditor Name[ \t]*\|[ \t]*Date of Inquiry[ \t]*\|[ \t]*Credit Bureau",
        r"[^\n]*\n(.*?)(?:\n[ \t]*\n|\z)",
    ))
    .unwrap()
});

static INQUIRY_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*([A-Z][^|\n]*?)[ \t]*\|[ \t]*(\d{2}/\d{2}/\d{4})[ \t]*\|[ \t]*(TransUnion|Experian|Equifax)\b",
    )
    .unwrap()
});

/// Emits one `HARD_INQUIRY` per well-formed row in every inquiries table.
pub fn extract_hard_inquiries(text: &str) -> Vec<DerogatoryItem> {
    INQUIRY_SECTION
        .captures_iter(text)
        .filter_map(|section| section.get(1))
        .flat_map(|rows| INQUIRY_ROW.captures_iter(rows.as_str()))
        .map(|row| {
            DerogatoryItem::new(ItemKind::HardInquiry, row[1].trim())
                .with_date(Some(row[2].to_string()))
                .with_bureau(&row[3])
        })
        .collect()
}
