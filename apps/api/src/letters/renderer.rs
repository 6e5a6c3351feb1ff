//! Dispute letter renderer for one letter per kind group, deterministic for a
//! given item set and date.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::extraction::{group_by_kind, KindGroup};
use crate::letters::templates::{
    fill, letter_rule, BUREAU_HEADER, DOB_PLACEHOLDER, ENCLOSURES, LETTER_OPENING,
    NOTHING_TO_DISPUTE, SIGNATURE, SSN_PLACEHOLDER, VERIFICATION_REQUEST,
};
use crate::letters::LetterError;
use crate::models::DerogatoryItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = LetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(LetterError::UnknownFormat(other.to_string())),
        }
    }
}

/// Result of a render. Rendering zero items never produces a letter.
#[derive(Debug, Clone, PartialEq)]
pub enum LetterOutput {
    NothingToDispute,
    /// All letters joined by an 80-character rule.
    Text(String),
    Letters(Vec<String>),
}

impl LetterOutput {
    pub fn is_nothing_to_dispute(&self) -> bool {
        matches!(self, LetterOutput::NothingToDispute)
    }

    /// JSON array of letter strings. `NothingToDispute` is `[]`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            LetterOutput::NothingToDispute => json!([]),
            LetterOutput::Text(text) => json!([text]),
            LetterOutput::Letters(letters) => json!(letters),
        }
    }
}

impl fmt::Display for LetterOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LetterOutput::NothingToDispute => f.write_str(NOTHING_TO_DISPUTE),
            LetterOutput::Text(text) => f.write_str(text),
            LetterOutput::Letters(letters) => f.write_str(&join_letters(letters)),
        }
    }
}

pub fn render_letters(
    items: &[DerogatoryItem],
    sender_name: &str,
    sender_address: &str,
    date: NaiveDate,
    format: OutputFormat,
) -> LetterOutput {
    if items.is_empty() {
        return LetterOutput::NothingToDispute;
    }

    let letters: Vec<String> = group_by_kind(items)
        .iter()
        .map(|group| render_letter(group, sender_name, sender_address, date))
        .collect();

    match format {
        OutputFormat::Text => LetterOutput::Text(join_letters(&letters)),
        OutputFormat::Json => LetterOutput::Letters(letters),
    }
}

/// Renders the letter for a single kind group.
pub fn render_letter(
    group: &KindGroup,
    sender_name: &str,
    sender_address: &str,
    date: NaiveDate,
) -> String {
    let kind = group.kind.label();
    let kind_lower = kind.to_lowercase();
    let date = date.format("%m/%d/%Y").to_string();

    let mut letter = fill(
        LETTER_OPENING,
        &[
            ("kind", kind),
            ("kind_lower", &kind_lower),
            ("bureau_header", BUREAU_HEADER),
            ("sender_name", sender_name),
            ("sender_address", sender_address),
            ("date", &date),
        ],
    );
    letter.push_str("\n\n");

    for item in &group.items {
        letter.push_str(&render_item(item));
        letter.push('\n');
    }

    letter.push_str(VERIFICATION_REQUEST);
    letter.push_str("\n\n");
    letter.push_str(ENCLOSURES);
    letter.push_str("\n\n");
    letter.push_str(&fill(
        SIGNATURE,
        &[
            ("sender_name", sender_name),
            ("ssn", SSN_PLACEHOLDER),
            ("dob", DOB_PLACEHOLDER),
        ],
    ));
    letter
}

/// One bullet. Absent fields produce no line at all.
fn render_item(item: &DerogatoryItem) -> String {
    let mut lines = vec![format!("- Item: {}", item.details)];
    if let Some(date) = &item.date {
        lines.push(format!("  Date: {date}"));
    }
    if let Some(creditor) = &item.creditor {
        lines.push(format!("  Creditor: {creditor}"));
    }
    if let Some(amount) = &item.amount {
        lines.push(format!("  Amount: {amount}"));
    }
    if let Some(bureau) = &item.bureau {
        lines.push(format!("  Bureau: {bureau}"));
    }
    lines.join("\n") + "\n"
}

fn join_letters(letters: &[String]) -> String {
    let separator = format!("\n\n{}\n\n", letter_rule());
    letters.join(separator.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{fixtures::THREE_BUREAU_REPORT, parse};
    use crate::models::{Amount, ItemKind};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    fn inquiries() -> Vec<DerogatoryItem> {
        vec![
            DerogatoryItem::new(ItemKind::HardInquiry, "SYNCB/AMAZON")
                .with_date(Some("02/11/2024".to_string()))
                .with_bureau("TransUnion"),
            DerogatoryItem::new(ItemKind::HardInquiry, "CHASE CARD"),
        ]
    }

    #[test]
    fn test_empty_items_signal_nothing_to_dispute() {
        let out = render_letters(&[], "Jane Roe", "1 A St", date(), OutputFormat::Text);
        assert!(out.is_nothing_to_dispute());
        assert_eq!(out.to_string(), "No derogatory items found to dispute.");
        assert_eq!(out.to_json(), json!([]));
    }

    #[test]
    fn test_one_letter_per_kind() {
        let items = parse(THREE_BUREAU_REPORT);
        let out = render_letters(&items, "Jane Roe", "1 A St", date(), OutputFormat::Json);
        let LetterOutput::Letters(letters) = out else {
            panic!("expected letter list");
        };
        assert_eq!(letters.len(), 6);
        assert!(letters[0].starts_with("DISPUTE LETTER FOR WRONG NAME\n"));
        assert!(letters[5].starts_with("DISPUTE LETTER FOR HARD INQUIRY\n"));
    }

    #[test]
    fn test_letter_has_one_bullet_per_item() {
        let group = KindGroup {
            kind: ItemKind::HardInquiry,
            items: inquiries(),
        };
        let letter = render_letter(&group, "Jane Roe", "1 A St", date());
        assert_eq!(letter.matches("- Item: ").count(), 2);
        assert_eq!(letter.matches("  Bureau: ").count(), 1);
        assert!(letter.contains("- Item: CHASE CARD\n\n"));
    }

    #[test]
    fn test_letter_structure() {
        let group = KindGroup {
            kind: ItemKind::HardInquiry,
            items: inquiries(),
        };
        let letter = render_letter(&group, "Jane Roe", "1 A St, Austin, TX 78701", date());
        assert!(letter.contains("Credit Bureaus:\n- TransUnion\n- Experian\n- Equifax\n"));
        assert!(letter.contains("Your Name: Jane Roe\n"));
        assert!(letter.contains("Current Address: 1 A St, Austin, TX 78701\n"));
        assert!(letter.contains("Date: 07/15/2025\n"));
        assert!(letter.contains("Dear Credit Bureau,"));
        assert!(letter.contains("dispute the following hard inquiry information"));
        assert!(letter.contains("please delete it from my credit file immediately"));
        assert!(letter.contains("driver's license and utility bill"));
        assert!(letter.ends_with(
            "Sincerely,\nJane Roe\n[YOUR SOCIAL SECURITY NUMBER]\n[DATE OF BIRTH]\n"
        ));
    }

    #[test]
    fn test_amount_is_formatted_as_currency() {
        let item = DerogatoryItem::new(ItemKind::ChargeOff, "CAPITAL ONE: Charged off")
            .with_amount(Some(Amount::parse("1,234.56")));
        let out = render_letters(&[item], "Jane Roe", "1 A St", date(), OutputFormat::Text);
        assert!(out.to_string().contains("  Amount: $1,234.56\n"));
    }

    #[test]
    fn test_text_output_separates_letters_with_rule() {
        let items = vec![
            DerogatoryItem::new(ItemKind::WrongName, "JON DOE"),
            DerogatoryItem::new(ItemKind::OldAddress, "1 A ST 11111"),
        ];
        let LetterOutput::Text(text) =
            render_letters(&items, "Jane Roe", "1 A St", date(), OutputFormat::Text)
        else {
            panic!("expected text");
        };
        let rule = format!("\n\n{}\n\n", "=".repeat(80));
        assert_eq!(text.matches(&rule).count(), 1);
        assert!(text.starts_with("DISPUTE LETTER FOR WRONG NAME"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let items = parse(THREE_BUREAU_REPORT);
        let a = render_letters(&items, "Jane Roe", "1 A St", date(), OutputFormat::Text);
        let b = render_letters(&items, "Jane Roe", "1 A St", date(), OutputFormat::Text);
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(" json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(LetterError::UnknownFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn test_json_output_is_an_array_of_letters() {
        let out = render_letters(&inquiries(), "Jane Roe", "1 A St", date(), OutputFormat::Json);
        let value = out.to_json();
        let letters = value.as_array().unwrap();
        assert_eq!(letters.len(), 1);
        assert!(letters[0].as_str().unwrap().starts_with("DISPUTE LETTER FOR HARD INQUIRY"));
    }
}
