use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag for a finding. Drives letter grouping and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    WrongName,
    OldAddress,
    Collection,
    ChargeOff,
    LatePayment,
    Repossession,
    DerogatoryAccount,
    Bankruptcy,
    HardInquiry,
}

impl ItemKind {
    /// Human-readable label used in letter headings, e.g. `CHARGE OFF`.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::WrongName => "WRONG NAME",
            ItemKind::OldAddress => "OLD ADDRESS",
            ItemKind::Collection => "COLLECTION",
            ItemKind::ChargeOff => "CHARGE OFF",
            ItemKind::LatePayment => "LATE PAYMENT",
            ItemKind::Repossession => "REPOSSESSION",
            ItemKind::DerogatoryAccount => "DEROGATORY ACCOUNT",
            ItemKind::Bankruptcy => "BANKRUPTCY",
            ItemKind::HardInquiry => "HARD INQUIRY",
        }
    }

    /// Wire tag, e.g. `CHARGE_OFF`. PDF letter file names are built from it.
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::WrongName => "WRONG_NAME",
            ItemKind::OldAddress => "OLD_ADDRESS",
            ItemKind::Collection => "COLLECTION",
            ItemKind::ChargeOff => "CHARGE_OFF",
            ItemKind::LatePayment => "LATE_PAYMENT",
            ItemKind::Repossession => "REPOSSESSION",
            ItemKind::DerogatoryAccount => "DEROGATORY_ACCOUNT",
            ItemKind::Bankruptcy => "BANKRUPTCY",
            ItemKind::HardInquiry => "HARD_INQUIRY",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A monetary value pulled from report text.
///
/// Values that match a labelled amount but fail numeric conversion are kept
/// verbatim as `Raw` instead of dropping the whole finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Value(f64),
    Raw(String),
}

impl Amount {
    /// Parses a digit-group/decimal token such as `1,234.56`. Rounds to cents.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim().trim_start_matches('$').trim();
        let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() && !cleaned.is_empty() => {
                Amount::Value((value * 100.0).round() / 100.0)
            }
            _ => Amount::Raw(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Value(v) => f.write_str(&format_currency(*v)),
            Amount::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Formats `1234.5` as `$1,234.50`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// A single derogatory finding. Only `kind` and `details` are always present;
/// every other field is independently optional and omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerogatoryItem {
    pub kind: ItemKind,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bureau: Option<String>,
}

impl DerogatoryItem {
    pub fn new(kind: ItemKind, details: impl Into<String>) -> Self {
        DerogatoryItem {
            kind,
            details: details.into(),
            date: None,
            creditor: None,
            amount: None,
            status: None,
            bureau: None,
        }
    }

    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub fn with_creditor(mut self, creditor: impl Into<String>) -> Self {
        self.creditor = Some(creditor.into());
        self
    }

    pub fn with_amount(mut self, amount: Option<Amount>) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_bureau(mut self, bureau: impl Into<String>) -> Self {
        self.bureau = Some(bureau.into());
        self
    }
}
