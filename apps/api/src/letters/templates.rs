// Fixed letter text. Placeholders in `{braces}` are substituted by the
// renderers; everything else is emitted verbatim.

pub const BUREAU_HEADER: &str = "Credit Bureaus:\n- TransUnion\n- Experian\n- Equifax";

/// Replace `{kind}`, `{kind_lower}`, `{bureau_header}`, `{sender_name}`,
/// `{sender_address}`, `{date}`.
pub const LETTER_OPENING: &str = "DISPUTE LETTER FOR {kind}

{bureau_header}

Your Name: {sender_name}
Current Address: {sender_address}
Date: {date}

Dear Credit Bureau,

I am writing to dispute the following {kind_lower} information on my credit report. \
This information is inaccurate and does not belong to me. \
Please investigate and remove or correct this information as soon as possible.";

pub const VERIFICATION_REQUEST: &str = "The reported information is incorrect. \
Please provide me with documentation verifying this information. \
If you cannot verify this information, please delete it from my credit file immediately.";

pub const ENCLOSURES: &str = "Enclosed are copies of my driver's license and utility bill to verify my identity. \
Please investigate this matter and correct any inaccurate information within 30 days as required by law.";

/// Literal placeholders. Real identifiers are never written into a letter.
pub const SSN_PLACEHOLDER: &str = "[YOUR SOCIAL SECURITY NUMBER]";
pub const DOB_PLACEHOLDER: &str = "[DATE OF BIRTH]";

/// Replace `{sender_name}`, `{ssn}`, `{dob}`.
pub const SIGNATURE: &str = "Sincerely,\n{sender_name}\n{ssn}\n{dob}\n";

pub const NOTHING_TO_DISPUTE: &str = "No derogatory items found to dispute.";

/// Separator between letters in text output.
pub fn letter_rule() -> String {
    "=".repeat(80)
}

// ────────────────────────────────────────────────────────────────────────────
// Sample letters
// ────────────────────────────────────────────────────────────────────────────

/// Illustrative narratives used by every sample letter, independent of the
/// parsed report.
pub const SAMPLE_NARRATIVES: [&str; 3] = [
    "LATE PAYMENT - ABC BANK (account ending 1234) reports a 30-day late payment for 03/2023. \
     I have never been late on this account and request that the late payment be removed.",
    "COLLECTION - XYZ RECOVERY SERVICES (account ending 5678) reports a balance of $450.00. \
     I do not recognize this debt and it has never been validated to me.",
    "HARD INQUIRY - QUICK LOANS INC on 01/15/2024. \
     I did not authorize this inquiry and request that it be deleted.",
];

/// Replace `{bureau}`.
pub const SAMPLE_SUBJECT: &str =
    "RE: Request for Investigation of Inaccurate Information on my {bureau} Credit Report";

/// Replace `{bureau}`.
pub const SAMPLE_INTRO: &str = "To Whom It May Concern,

I am writing to dispute the following items that appear on my {bureau} credit report. \
Under the Fair Credit Reporting Act, I request that you investigate each item listed below.";

pub const SAMPLE_CLOSING: &str = "Please conduct a reasonable investigation of each item and delete any \
information that cannot be verified as accurate and complete. Send me written notice of the results \
and an updated copy of my credit report when your investigation is complete.";

/// Dispute mailing address for each bureau.
pub fn bureau_mailing_address(bureau: &str) -> &'static str {
    match bureau {
        "TransUnion" => "TransUnion LLC\nConsumer Dispute Center\nP.O. Box 2000\nChester, PA 19016",
        "Experian" => "Experian\nP.O. Box 4500\nAllen, TX 75013",
        "Equifax" => "Equifax Information Services LLC\nP.O. Box 740256\nAtlanta, GA 30374",
        _ => "Consumer Dispute Department",
    }
}

/// Substitutes `{key}` placeholders in one pass, so substituted values are
/// never themselves scanned for placeholders. Unknown keys are left as-is.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_substitutes_known_keys() {
        assert_eq!(fill("Hi {name}, {x}", &[("name", "Ann")]), "Hi Ann, {x}");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        assert_eq!(
            fill("{a} {b}", &[("a", "{b}"), ("b", "two")]),
            "{b} two"
        );
    }

    #[test]
    fn test_fill_handles_unclosed_brace() {
        assert_eq!(fill("price {", &[]), "price {");
    }

    #[test]
    fn test_every_bureau_has_a_mailing_address() {
        for bureau in ["TransUnion", "Experian", "Equifax"] {
            assert!(bureau_mailing_address(bureau).contains("P.O. Box"));
        }
    }
}
