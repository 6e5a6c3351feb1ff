//! Account-derogatory rules.
//!
//! An account block opens on a creditor line (optionally carrying the bureau
//! columns), may be followed by bureau column rows, then an `Account #:` line.
//! It runs until the next block opens. A block is a finding only when it carries every
//! labelled field in order and its rating says `Derogatory`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Amount, DerogatoryItem, ItemKind};

static BLOCK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*([A-Za-z0-9][^|\n:]*?)[ \t]*(?:\|[^\n]*)?",
        // bureau column rows between the creditor and its fields
        r"(?:\n[ \t|]*(?i:transunion|experian|equifax)\b[^\n:]*)*",
        r"\n[ \t]*Account #:",
    ))
    .unwrap()
});

static REQUIRED_FIELDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)High Balance:.*?",
        r"Account Rating:[ \t]*([^\n]*)\n.*?",
        r"Account Status:[ \t]*([^\n]*)\n.*?",
        r"Payment Status:[ \t]*([^\n]*)\n.*?",
        r"Creditor Remarks:[ \t]*([^|\n]*)",
    ))
    .unwrap()
});

static BALANCE_OWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Balance Owed:[ \t]*\$?[ \t]*([^\s|]+)").unwrap());

static DATE_REPORTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Date Reported:[ \t]*(\d{2}/\d{2}/\d{4})").unwrap());

static DEROGATORY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)derogatory").unwrap());
static COLLECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)collection").unwrap());
static CHARGE_OFF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)charge[ \t-]?off|charged[ \t]+off").unwrap());
static LATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\blate\b").unwrap());
static REPOSSESSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)repossession").unwrap());

/// Fields captured from one account block.
#[derive(Debug, Clone, PartialEq)]
struct AccountBlock<'a> {
    creditor: &'a str,
    rating: &'a str,
    payment_status: &'a str,
    remarks: &'a str,
    body: &'a str,
}

pub fn extract_account_derogatories(text: &str) -> Vec<DerogatoryItem> {
    split_blocks(text)
        .into_iter()
        .filter_map(|(creditor, body)| read_block(creditor, body))
        .filter(|block| DEROGATORY.is_match(block.rating))
        .map(to_item)
        .collect()
}

/// Classifies a derogatory account. First match wins.
pub fn classify(payment_status: &str, remarks: &str) -> ItemKind {
    if COLLECTION.is_match(payment_status) || COLLECTION.is_match(remarks) {
        ItemKind::Collection
    } else if CHARGE_OFF.is_match(payment_status) || CHARGE_OFF.is_match(remarks) {
        ItemKind::ChargeOff
    } else if LATE.is_match(payment_status) {
        ItemKind::LatePayment
    } else if REPOSSESSION.is_match(remarks) {
        ItemKind::Repossession
    } else {
        ItemKind::DerogatoryAccount
    }
}

fn split_blocks(text: &str) -> Vec<(&str, &str)> {
    let headers: Vec<_> = BLOCK_HEADER.captures_iter(text).collect();
    headers
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let creditor = caps.get(1)?.as_str();
            let end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            Some((creditor, &text[whole.start()..end]))
        })
        .collect()
}

fn read_block<'a>(creditor: &'a str, body: &'a str) -> Option<AccountBlock<'a>> {
    let fields = REQUIRED_FIELDS.captures(body)?;
    Some(AccountBlock {
        creditor,
        rating: fields.get(1)?.as_str().trim(),
        payment_status: fields.get(3)?.as_str().trim(),
        remarks: fields.get(4)?.as_str().trim(),
        body,
    })
}

fn to_item(block: AccountBlock<'_>) -> DerogatoryItem {
    let kind = classify(block.payment_status, block.remarks);
    let amount = BALANCE_OWED
        .captures(block.body)
        .map(|caps| Amount::parse(&caps[1]));
    let date = DATE_REPORTED
        .captures(block.body)
        .map(|caps| caps[1].to_string());

    DerogatoryItem::new(kind, format!("{}: {}", block.creditor, block.remarks))
        .with_creditor(block.creditor)
        .with_status(block.payment_status)
        .with_amount(amount)
        .with_date(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNTS: &str = r#"
ACCOUNT HISTORY
CAPITAL ONE | TransUnion | Experian | Equifax
Account #: 5178****
High Balance: $2,500.00
Account Rating: Derogatory
Account Status: Closed
Payment Status: Collection/Chargeoff
Creditor Remarks: Placed for collection
Balance Owed: $1,234.56
Date Reported: 03/15/2023

MIDLAND FUNDING | TransUnion | Experian | Equifax
Account #: 88812
High Balance: $900.00
Account Rating: Open
Account Status: Open
Payment Status: Current
Creditor Remarks: None

SANTANDER AUTO
Account #: 44-1
High Balance: $18,000.00
Account Rating: Derogatory
Account Status: Closed
Payment Status: Late 90 Days
Creditor Remarks: Involuntary repossession
Balance Owed: N/A
"#;

    #[test]
    fn test_only_derogatory_ratings_are_emitted() {
        let items = extract_account_derogatories(ACCOUNTS);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].creditor.as_deref(), Some("CAPITAL ONE"));
        assert_eq!(items[1].creditor.as_deref(), Some("SANTANDER AUTO"));
    }

    #[test]
    fn test_collection_outranks_generic_fallback() {
        let items = extract_account_derogatories(ACCOUNTS);
        assert_eq!(items[0].kind, ItemKind::Collection);
        assert_eq!(items[0].details, "CAPITAL ONE: Placed for collection");
        assert_eq!(items[0].status.as_deref(), Some("Collection/Chargeoff"));
    }

    #[test]
    fn test_balance_and_date_are_captured() {
        let items = extract_account_derogatories(ACCOUNTS);
        assert_eq!(items[0].amount, Some(Amount::Value(1234.56)));
        assert_eq!(items[0].date.as_deref(), Some("03/15/2023"));
    }

    #[test]
    fn test_malformed_balance_is_kept_as_text() {
        let items = extract_account_derogatories(ACCOUNTS);
        assert_eq!(items[1].amount, Some(Amount::Raw("N/A".to_string())));
        assert_eq!(items[1].date, None);
    }

    #[test]
    fn test_late_status_outranks_repossession_remark() {
        let items = extract_account_derogatories(ACCOUNTS);
        assert_eq!(items[1].kind, ItemKind::LatePayment);
    }

    #[test]
    fn test_classification_precedence() {
        assert_eq!(classify("COLLECTION", ""), ItemKind::Collection);
        assert_eq!(classify("Current", "Placed for collection"), ItemKind::Collection);
        assert_eq!(classify("Chargeoff", ""), ItemKind::ChargeOff);
        assert_eq!(classify("CHARGE-OFF", ""), ItemKind::ChargeOff);
        assert_eq!(classify("Closed", "Charged off account"), ItemKind::ChargeOff);
        assert_eq!(classify("LATE PAYMENT 30", ""), ItemKind::LatePayment);
        assert_eq!(classify("Closed", "REPOSSESSION"), ItemKind::Repossession);
        assert_eq!(classify("Closed", "Consumer disputes"), ItemKind::DerogatoryAccount);
        assert_eq!(classify("Unrelated", ""), ItemKind::DerogatoryAccount);
    }

    #[test]
    fn test_missing_required_field_is_not_matched() {
        let text = "ACME BANK\nAccount #: 1\nHigh Balance: $1\nAccount Rating: Derogatory\n\
                    Payment Status: Collection\nCreditor Remarks: none\n";
        assert!(extract_account_derogatories(text).is_empty());
    }

    #[test]
    fn test_bureau_column_row_between_creditor_and_fields() {
        let text = "CAPITAL ONE\n | TransUnion | Experian | Equifax\nAccount #: 5178****\n\
                    High Balance: $2,500.00\nAccount Rating: Derogatory\nAccount Status: Closed\n\
                    Payment Status: Collection\nCreditor Remarks: Placed for collection\n";
        let items = extract_account_derogatories(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Collection);
        assert_eq!(items[0].creditor.as_deref(), Some("CAPITAL ONE"));
    }

    #[test]
    fn test_section_heading_is_not_taken_as_creditor() {
        let text = "ACCOUNT HISTORY\nALLY FINANCIAL\nTransUnion | Experian | Equifax\n\
                    Account #: 9921\nHigh Balance: $1\nAccount Rating: Derogatory\n\
                    Account Status: Closed\nPayment Status: Late 30 Days\nCreditor Remarks: none\n";
        let items = extract_account_derogatories(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].creditor.as_deref(), Some("ALLY FINANCIAL"));
        assert_eq!(items[0].kind, ItemKind::LatePayment);
    }

    #[test]
    fn test_text_without_accounts_yields_nothing() {
        assert!(extract_account_derogatories("").is_empty());
        assert!(extract_account_derogatories("Account Rating: Derogatory").is_empty());
    }
}
