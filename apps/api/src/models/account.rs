use serde::{Deserialize, Serialize};

pub const UNKNOWN_CREDITOR: &str = "UNKNOWN";
pub const UNKNOWN_BALANCE: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

/// Flat per-account record produced by the bureau-segmented pipeline.
/// Serialized with the report's own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "Creditor")]
    pub creditor: String,
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Balance")]
    pub balance: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Dispute Status")]
    pub dispute_status: String,
    #[serde(rename = "Past Due Amount")]
    pub past_due_amount: String,
    #[serde(rename = "Late 30")]
    pub late_30: String,
    #[serde(rename = "Late 60")]
    pub late_60: String,
    #[serde(rename = "Late 90")]
    pub late_90: String,
}

impl Default for AccountRecord {
    fn default() -> Self {
        AccountRecord {
            creditor: UNKNOWN_CREDITOR.to_string(),
            account_number: NOT_AVAILABLE.to_string(),
            balance: UNKNOWN_BALANCE.to_string(),
            status: "Derogatory".to_string(),
            dispute_status: "Not Disputed".to_string(),
            past_due_amount: NOT_AVAILABLE.to_string(),
            late_30: "0".to_string(),
            late_60: "0".to_string(),
            late_90: "0".to_string(),
        }
    }
}
