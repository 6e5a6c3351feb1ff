//! Personal-information rules: inconsistent names across the bureau columns
//! and previously reported addresses.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DerogatoryItem, ItemKind};

/// Cell values a bureau column uses when it has nothing on file.
const PLACEHOLDERS: &[&str] = &["--", "NONE REPORTED"];

/// A `Name | col | col | col` row. Anchored to the line start so headers such
/// as `Creditor Name |` are not mistaken for it.
static NAME_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*Name[ \t]*\|([^\n]*)$").unwrap());

static PREVIOUS_ADDRESS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)current address:.*?previous address:(.*?)(?:\n[ \t]*\n|\z)").unwrap()
});

/// Starts at a house number, ends at a ZIP (optionally ZIP+4), a column
/// delimiter or the end of the line.
static ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)\b\d+[ \t]+[^|\n]*?(?:\b\d{5}(?:-\d{4})?\b|\||$)").unwrap()
});

pub fn extract_personal_info(text: &str) -> Vec<DerogatoryItem> {
    let mut items = extract_wrong_names(text);
    items.extend(extract_old_addresses(text));
    items
}

/// Emits one `WRONG_NAME` per distinct name when the bureaus disagree.
pub fn extract_wrong_names(text: &str) -> Vec<DerogatoryItem> {
    let mut names: Vec<String> = Vec::new();

    for row in NAME_ROW.captures_iter(text) {
        for cell in row[1].split('|').take(3) {
            let name = cell.split_whitespace().collect::<Vec<_>>().join(" ");
            if name.is_empty() || is_placeholder(&name) || names.contains(&name) {
                continue;
            }
            names.push(name);
        }
    }

    if names.len() < 2 {
        return Vec::new();
    }

    names
        .into_iter()
        .map(|name| DerogatoryItem::new(ItemKind::WrongName, name))
        .collect()
}

/// Emits one `OLD_ADDRESS` per address found under `PREVIOUS ADDRESS:`.
pub fn extract_old_addresses(text: &str) -> Vec<DerogatoryItem> {
    let Some(block) = PREVIOUS_ADDRESS_BLOCK.captures(text) else {
        return Vec::new();
    };

    ADDRESS
        .find_iter(&block[1])
        .map(|m| m.as_str().replace('|', "").trim().to_string())
        .filter(|addr| !addr.is_empty() && !addr.to_lowercase().contains("current address"))
        .map(|addr| DerogatoryItem::new(ItemKind::OldAddress, addr))
        .collect()
}

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| value.eq_ignore_ascii_case(p))
}
