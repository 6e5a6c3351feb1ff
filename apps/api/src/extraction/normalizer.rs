//! Text normalizer: whitespace collapse and canonical casing for the
//! derogatory keyword vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Keyword patterns and their canonical spelling. Matching is case-insensitive.
static KEYWORDS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)late[ \t]+payment").unwrap(), "LATE PAYMENT"),
        (Regex::new(r"(?i)collection").unwrap(), "COLLECTION"),
        (Regex::new(r"(?i)charge[ \t-]?off").unwrap(), "CHARGE-OFF"),
        (Regex::new(r"(?i)repossession").unwrap(), "REPOSSESSION"),
        (Regex::new(r"(?i)bankruptcy").unwrap(), "BANKRUPTCY"),
        (Regex::new(r"(?i)child[ \t]+support").unwrap(), "CHILD SUPPORT"),
        (Regex::new(r"(?i)inquiry").unwrap(), "INQUIRY"),
    ]
});

/// Collapses every whitespace run to a single space and canonicalizes keyword
/// casing. Stable: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    canonicalize_keywords(&collapsed)
}

/// Canonicalizes keyword casing only, leaving line structure intact. This is
/// the form the segment extractors consume: their rules key on row and field
/// boundaries that a whitespace collapse would erase.
pub fn canonicalize_keywords(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, canonical) in KEYWORDS.iter() {
        if pattern.is_match(&out) {
            out = pattern.replace_all(&out, *canonical).into_owned();
        }
    }
    out
}
