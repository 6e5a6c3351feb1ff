use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use bytes::Bytes;
use chrono::NaiveDate;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::segmented::BUREAUS;
use crate::extraction::{parse, parse_segmented};
use crate::ingest::extract_report_text;
use crate::letters::pdf::write_letter_pdfs;
use crate::letters::sample::render_sample_letters;
use crate::letters::templates::NOTHING_TO_DISPUTE;
use crate::mailer::{DispatchReceipt, OutgoingMail};
use crate::models::UserData;

/// Multipart field carrying the uploaded report.
pub const REPORT_FIELD: &str = "credit_report";

pub const CATEGORY_SUBJECT: &str = "Your Credit Dispute Package";
pub const SAMPLE_SUBJECT: &str = "Your Credit Dispute Letters";

/// Which letter set a package carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageMode {
    /// One PDF per derogatory category found by `parse`.
    Categories,
    /// One text letter per bureau found by `parse_segmented`.
    Sample,
}

#[derive(Debug, Clone)]
pub struct UploadedReport {
    pub file_name: String,
    pub bytes: Bytes,
}

/// User details plus the uploaded report, as submitted by the form.
#[derive(Debug, Clone, Default)]
pub struct DisputeForm {
    pub user: UserData,
    pub report: Option<UploadedReport>,
}

impl DisputeForm {
    /// Drains a multipart body. Unknown text fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = DisputeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == REPORT_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.report = Some(UploadedReport { file_name, bytes });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))?;
                form.user.set_field(&name, value.trim().to_string());
            }
        }

        Ok(form)
    }

    /// Checks the fields every package needs and hands back the upload.
    pub fn validate(&self) -> Result<&UploadedReport, AppError> {
        if self.user.full_name.trim().is_empty() {
            return Err(AppError::Validation("full_name is required".to_string()));
        }
        if self.user.email.trim().is_empty() {
            return Err(AppError::Validation("email is required".to_string()));
        }
        self.report
            .as_ref()
            .ok_or_else(|| AppError::Validation("Please upload a credit report".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageOutcome {
    pub items_found: usize,
    pub letters: Vec<PathBuf>,
}

/// Extracts the report text and writes the letter set into `output_dir`.
/// Only files that passed the existence/size check are returned.
pub fn build_package(
    mode: PackageMode,
    report: &UploadedReport,
    user: &UserData,
    date: NaiveDate,
    output_dir: &Path,
) -> Result<PackageOutcome, AppError> {
    let text = extract_report_text(&report.file_name, &report.bytes)?;

    let outcome = match mode {
        PackageMode::Categories => {
            let items = parse(&text);
            let letters = write_letter_pdfs(&items, user, date, output_dir)?;
            PackageOutcome {
                items_found: items.len(),
                letters,
            }
        }
        PackageMode::Sample => {
            let bureaus = parse_segmented(&text);
            let items_found = bureaus.values().map(Vec::len).sum();
            let found: Vec<&str> = bureaus.keys().map(String::as_str).collect();
            let targets: &[&str] = if found.is_empty() { &BUREAUS } else { &found };
            let letters = render_sample_letters(targets, user, date, output_dir)?;
            PackageOutcome {
                items_found,
                letters,
            }
        }
    };

    info!(
        "Built {:?} package: {} items, {} letters",
        mode,
        outcome.items_found,
        outcome.letters.len()
    );
    Ok(outcome)
}

/// User-facing summary of what happened to a package. Delivery is only
/// claimed when the dispatcher says the mail left the service.
pub fn outcome_message(outcome: &PackageOutcome, receipt: Option<&DispatchReceipt>) -> String {
    let found = outcome.items_found;
    let generated = outcome.letters.len();
    match receipt {
        _ if generated == 0 && found == 0 => NOTHING_TO_DISPUTE.to_string(),
        _ if generated == 0 => {
            format!("Found {found} items but the dispute letters could not be generated.")
        }
        Some(receipt) if receipt.delivered => {
            format!("Found {found} items and generated {generated} dispute letters. Check your email!")
        }
        Some(receipt) => format!(
            "Found {found} items and generated {generated} dispute letters. \
             The '{}' mail transport recorded the message but did not deliver it.",
            receipt.via
        ),
        None => format!("Found {found} items and generated {generated} dispute letters."),
    }
}

/// The message carrying a package to its owner.
pub fn package_mail(mode: PackageMode, user: &UserData, outcome: &PackageOutcome) -> OutgoingMail {
    let (subject, body) = match mode {
        PackageMode::Categories => (
            CATEGORY_SUBJECT,
            format!(
                "Your dispute package has been generated. Found {} items to dispute across {} letters.",
                outcome.items_found,
                outcome.letters.len()
            ),
        ),
        PackageMode::Sample => (
            SAMPLE_SUBJECT,
            "Attached are your generated credit dispute letters.".to_string(),
        ),
    };

    OutgoingMail {
        recipient: user.email.trim().to_string(),
        subject: subject.to_string(),
        body,
        attachments: outcome.letters.clone(),
    }
}
