//! Sample letters for the bureau-segmented pipeline.
//!
//! Each bureau gets one text letter built from the fixed illustrative
//! narratives in `templates`. Parsed account records are deliberately not
//! consulted here.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::letters::files::{retain_deliverable, safe_filename, write_file};
use crate::letters::templates::{
    bureau_mailing_address, fill, DOB_PLACEHOLDER, SAMPLE_CLOSING, SAMPLE_INTRO, SAMPLE_NARRATIVES,
    SAMPLE_SUBJECT, SIGNATURE, SSN_PLACEHOLDER,
};
use crate::letters::LetterError;
use crate::models::UserData;

/// File name for a bureau's sample letter.
pub fn sample_letter_file_name(bureau: &str) -> String {
    format!("{}_dispute_letter.txt", safe_filename(bureau))
}

/// Writes one sample letter per bureau into `output_dir` and returns the paths
/// that passed the existence / non-empty check.
pub fn render_sample_letters(
    bureaus: &[&str],
    user: &UserData,
    date: NaiveDate,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, LetterError> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(bureaus.len());
    for bureau in bureaus {
        let path = output_dir.join(sample_letter_file_name(bureau));
        let letter = render_sample_letter(bureau, user, date);
        write_file(&path, letter.as_bytes())?;
        debug!("Wrote sample letter {}", path.display());
        written.push(path);
    }

    let deliverable = retain_deliverable(written);
    info!(
        "Generated {} of {} sample dispute letters",
        deliverable.len(),
        bureaus.len()
    );
    Ok(deliverable)
}

pub fn render_sample_letter(bureau: &str, user: &UserData, date: NaiveDate) -> String {
    let long_date = date.format("%B %-d, %Y").to_string();

    let mut sender = vec![user.full_name.trim().to_string()];
    let address = user.mailing_address();
    if !address.is_empty() {
        sender.push(address);
    }
    if !user.phone.trim().is_empty() {
        sender.push(format!("Phone: {}", user.phone.trim()));
    }
    if !user.email.trim().is_empty() {
        sender.push(format!("Email: {}", user.email.trim()));
    }

    let narratives = SAMPLE_NARRATIVES
        .iter()
        .enumerate()
        .map(|(i, narrative)| format!("{}. {}", i + 1, narrative))
        .collect::<Vec<_>>()
        .join("\n\n");

    [
        sender.join("\n"),
        long_date,
        bureau_mailing_address(bureau).to_string(),
        fill(SAMPLE_SUBJECT, &[("bureau", bureau)]),
        fill(SAMPLE_INTRO, &[("bureau", bureau)]),
        narratives,
        SAMPLE_CLOSING.to_string(),
        fill(
            SIGNATURE,
            &[
                ("sender_name", user.full_name.trim()),
                ("ssn", SSN_PLACEHOLDER),
                ("dob", DOB_PLACEHOLDER),
            ],
        ),
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserData {
        UserData {
            full_name: "Jane Roe".to_string(),
            street_address: "42 Oak Ave".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: "78701".to_string(),
            ssn_last4: "6789".to_string(),
            dob: "01/02/1985".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    #[test]
    fn test_three_bureaus_produce_three_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = render_sample_letters(
            &["Equifax", "Experian", "TransUnion"],
            &user(),
            date(),
            dir.path(),
        )
        .unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "Equifax_dispute_letter.txt",
                "Experian_dispute_letter.txt",
                "TransUnion_dispute_letter.txt",
            ]
        );
        for path in &paths {
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_sample_letter_uses_fixed_narratives() {
        let letter = render_sample_letter("Experian", &user(), date());
        assert!(letter.contains("July 15, 2025"));
        assert!(letter.contains("P.O. Box 4500"));
        assert!(letter.contains("my Experian credit report"));
        for (i, narrative) in SAMPLE_NARRATIVES.iter().enumerate() {
            assert!(letter.contains(&format!("{}. {}", i + 1, narrative)));
        }
    }

    #[test]
    fn test_sample_letter_never_contains_real_identifiers() {
        let letter = render_sample_letter("Equifax", &user(), date());
        assert!(!letter.contains("6789"));
        assert!(!letter.contains("01/02/1985"));
        assert!(letter.contains("[YOUR SOCIAL SECURITY NUMBER]"));
        assert!(letter.contains("[DATE OF BIRTH]"));
    }

    #[test]
    fn test_output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let paths = render_sample_letters(&["TransUnion"], &user(), date(), &nested).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].starts_with(&nested));
    }
}
