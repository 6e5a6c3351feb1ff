//! Uploaded credit report → plain text. Only PDF and plain-text reports are
//! accepted; anything else fails the whole request before extraction starts.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported report format '{0}'; upload a PDF or TXT credit report")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Text,
}

impl ReportFormat {
    /// Detects the format from the uploaded file's extension.
    pub fn from_file_name(file_name: &str) -> Result<Self, IngestError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(ReportFormat::Pdf),
            Some("txt") => Ok(ReportFormat::Text),
            _ => Err(IngestError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

pub fn extract_report_text(file_name: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let text = match ReportFormat::from_file_name(file_name)? {
        ReportFormat::Text => String::from_utf8_lossy(bytes).into_owned(),
        ReportFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| IngestError::Pdf(e.to_string()))?,
    };
    debug!("Extracted {} chars from {file_name}", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(ReportFormat::from_file_name("Report.PDF").unwrap(), ReportFormat::Pdf);
        assert_eq!(ReportFormat::from_file_name("report.txt").unwrap(), ReportFormat::Text);
    }

    #[test]
    fn test_other_formats_are_rejected() {
        for name in ["report.docx", "scan.png", "report"] {
            assert!(matches!(
                ReportFormat::from_file_name(name),
                Err(IngestError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_text_reports_are_decoded() {
        let text = extract_report_text("r.txt", b"Name | JOHN DOE | JON DOE\n").unwrap();
        assert_eq!(text, "Name | JOHN DOE | JON DOE\n");
    }

    #[test]
    fn test_invalid_pdf_bytes_fail_extraction() {
        assert!(matches!(
            extract_report_text("r.pdf", b"not a pdf"),
            Err(IngestError::Pdf(_))
        ));
    }
}
