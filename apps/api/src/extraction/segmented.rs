//! Bureau-segmented extraction, the alternate pipeline.
//!
//! The raw text is cut at every bureau-name token; each bureau's section is
//! scanned line by line for derogatory blocks, and each block flattens into an
//! [`AccountRecord`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::account::{AccountRecord, NOT_AVAILABLE, UNKNOWN_BALANCE, UNKNOWN_CREDITOR};

/// Bureau name → records, in the order the blocks appeared.
pub type BureauAccounts = BTreeMap<String, Vec<AccountRecord>>;

pub const BUREAUS: [&str; 3] = ["TransUnion", "Experian", "Equifax"];

static BUREAU_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(transunion|experian|equifax)®?").unwrap());
static BLOCK_TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)derogatory|collection|charge[- ]?off").unwrap());
static SECTION_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z\s]+:$").unwrap());

static ACCOUNT_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Account[ \t]*#").unwrap());
static ACCOUNT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Account[ \t]*#:?[ \t]*([A-Za-z0-9*]+)").unwrap());
static CAPITALIZED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9 \-/&.']*[A-Z][A-Z0-9 \-/&.']*$").unwrap());
static BALANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Balance Owed:[ \t]*\$?[ \t]*([0-9,]+(?:\.[0-9]{2})?)").unwrap());
static PAST_DUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Past Due Amount:[ \t]*\$?[ \t]*([0-9,]+(?:\.[0-9]{2})?)").unwrap());
static CHARGE_OFF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)charge[- ]?off|charged off").unwrap());
static COLLECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)collection").unwrap());
static LATE_30: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b30:[ \t]*([0-9]+)").unwrap());
static LATE_60: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b60:[ \t]*([0-9]+)").unwrap());
static LATE_90: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b90:[ \t]*([0-9]+)").unwrap());

pub fn parse_segmented(raw_text: &str) -> BureauAccounts {
    let mut accounts = BureauAccounts::new();
    for (bureau, section) in split_by_bureau(raw_text) {
        let records = assemble_blocks(section)
            .iter()
            .map(|block| read_record(block))
            .collect::<Vec<_>>();
        // A bureau is keyed once it is mentioned, even without derogatory blocks.
        accounts.entry(bureau).or_default().extend(records);
    }
    accounts
}

/// Canonical display name for a bureau token, ignoring case and `®`.
pub fn canonical_bureau(token: &str) -> Option<&'static str> {
    let bare = token.trim().trim_end_matches('®').to_lowercase();
    BUREAUS.into_iter().find(|b| b.to_lowercase() == bare)
}

/// `(bureau, section)` pairs; a section runs to the next bureau token.
fn split_by_bureau(text: &str) -> Vec<(String, &str)> {
    let tokens: Vec<_> = BUREAU_TOKEN.find_iter(text).collect();
    tokens
        .iter()
        .enumerate()
        .filter_map(|(i, token)| {
            let bureau = canonical_bureau(token.as_str())?;
            let end = tokens.get(i + 1).map_or(text.len(), |next| next.start());
            Some((bureau.to_string(), &text[token.end()..end]))
        })
        .collect()
}

/// A block opens on a trigger line and closes on a blank line or a bare
/// `Title:` heading. A new trigger line closes any open block first.
fn assemble_blocks(section: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut in_block = false;

    for line in section.lines() {
        if BLOCK_TRIGGER.is_match(line) {
            if !block.is_empty() {
                blocks.push(block.join("\n"));
                block.clear();
            }
            in_block = true;
        }
        if in_block {
            block.push(line);
            if line.trim().is_empty() || SECTION_TITLE.is_match(line.trim_end()) {
                blocks.push(block.join("\n"));
                block.clear();
                in_block = false;
            }
        }
    }
    if !block.is_empty() {
        blocks.push(block.join("\n"));
    }
    blocks
}

fn read_record(block: &str) -> AccountRecord {
    let mut record = AccountRecord {
        creditor: creditor_of(block).unwrap_or_else(|| UNKNOWN_CREDITOR.to_string()),
        account_number: capture(&ACCOUNT_NUMBER, block).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        balance: capture(&BALANCE, block).unwrap_or_else(|| UNKNOWN_BALANCE.to_string()),
        past_due_amount: capture(&PAST_DUE, block).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ..AccountRecord::default()
    };

    record.status = if CHARGE_OFF.is_match(block) {
        "Charge-off"
    } else if COLLECTION.is_match(block) {
        "Collection"
    } else {
        "Derogatory"
    }
    .to_string();

    if block.to_lowercase().contains("dispute") {
        record.dispute_status = "Disputed".to_string();
    }

    for (pattern, slot) in [
        (&LATE_30, &mut record.late_30),
        (&LATE_60, &mut record.late_60),
        (&LATE_90, &mut record.late_90),
    ] {
        if let Some(count) = capture(pattern, block) {
            *slot = count;
        }
    }

    record
}

/// Text ahead of an `Account #` label, else the first all-caps line that is
/// not itself a status keyword line.
fn creditor_of(block: &str) -> Option<String> {
    let labelled = block.lines().find_map(|line| {
        let label = ACCOUNT_LABEL.find(line)?;
        let before = line[..label.start()]
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '|' | ','))
            .trim();
        (!before.is_empty()).then(|| before.to_string())
    });

    labelled.or_else(|| {
        block
            .lines()
            .map(str::trim)
            .find(|line| CAPITALIZED_LINE.is_match(line) && !BLOCK_TRIGGER.is_match(line))
            .map(str::to_string)
    })
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures(text).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"Experian®
Account Summary:
MIDLAND CREDIT MGMT
Collection account
Account # MCM99812
Balance Owed: $1,250
Past Due Amount: $300
Consumer disputes this account
30: 2 60: 1 90: 0

TRANSUNION
PORTFOLIO RECOVERY Account # 7731* Derogatory
Balance Owed: $88.40
Late Payments:
ignored trailing line

EQUIFAX
All accounts in good standing
"#;

    #[test]
    fn test_charge_off_block_round_trip() {
        let text = "Experian\nCAPITAL ONE\nCharge off\nAccount #: 12345\nBalance Owed: $500\n";
        let accounts = parse_segmented(text);
        let records = &accounts["Experian"];
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "Charge-off");
        assert_eq!(records[0].account_number, "12345");
        assert_eq!(records[0].balance, "500");
    }

    #[test]
    fn test_sections_are_keyed_by_canonical_bureau() {
        let accounts = parse_segmented(REPORT);
        let keys: Vec<_> = accounts.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Equifax", "Experian", "TransUnion"]);
        assert!(accounts["Equifax"].is_empty());
    }

    #[test]
    fn test_collection_block_fields() {
        let accounts = parse_segmented(REPORT);
        let record = &accounts["Experian"][0];
        assert_eq!(record.status, "Collection");
        assert_eq!(record.account_number, "MCM99812");
        assert_eq!(record.balance, "1,250");
        assert_eq!(record.past_due_amount, "300");
        assert_eq!(record.dispute_status, "Disputed");
        assert_eq!(record.late_30, "2");
        assert_eq!(record.late_60, "1");
        assert_eq!(record.late_90, "0");
    }

    #[test]
    fn test_block_closes_on_title_line() {
        let accounts = parse_segmented(REPORT);
        let records = &accounts["TransUnion"];
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.creditor, "PORTFOLIO RECOVERY");
        assert_eq!(record.account_number, "7731*");
        assert_eq!(record.status, "Derogatory");
        assert_eq!(record.balance, "88.40");
        assert_eq!(record.dispute_status, "Not Disputed");
        assert_eq!(record.past_due_amount, "N/A");
        assert_eq!(record.late_90, "0");
    }

    #[test]
    fn test_blank_labels_do_not_read_the_next_line() {
        let accounts = parse_segmented("Experian\nCollection account\nAccount #:\nBalance Owed:\n5\n");
        let record = &accounts["Experian"][0];
        assert_eq!(record.account_number, "N/A");
        assert_eq!(record.balance, "Unknown");
    }

    #[test]
    fn test_canonical_bureau() {
        assert_eq!(canonical_bureau("TRANSUNION®"), Some("TransUnion"));
        assert_eq!(canonical_bureau("experian"), Some("Experian"));
        assert_eq!(canonical_bureau("Innovis"), None);
    }

    #[test]
    fn test_text_without_bureaus_is_empty() {
        assert!(parse_segmented("Collection account\nBalance Owed: $5").is_empty());
    }
}
