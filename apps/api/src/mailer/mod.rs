//! Email dispatch for generated letters.
//!
//! The service depends only on the [`MailDispatcher`] trait. SMTP settings are
//! required configuration; there are no built-in fallback credentials.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Recipient email address is empty")]
    MissingRecipient,

    #[error("None of the {0} attachments could be read")]
    NoAttachments(usize),

    #[error("SMTP credentials for {0} are empty")]
    MissingCredentials(String),
}

/// SMTP endpoint and credentials, injected at startup.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub sender: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

/// What a dispatcher actually did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// Transport name, e.g. `log`.
    pub via: &'static str,
    /// True only when the message left the service.
    pub delivered: bool,
    pub attached: usize,
    pub skipped: usize,
}

/// Delivers a message with file attachments. Implement this to swap
/// transports without touching the dispute flow.
///
/// Carried in `AppState` as `Arc<dyn MailDispatcher>`.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<DispatchReceipt, MailError>;
}

/// Dispatcher that validates and logs each message against the configured
/// SMTP account without opening a connection. Its receipts are never
/// `delivered`.
pub struct LoggingDispatcher {
    settings: SmtpSettings,
}

impl LoggingDispatcher {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl MailDispatcher for LoggingDispatcher {
    async fn send(&self, mail: &OutgoingMail) -> Result<DispatchReceipt, MailError> {
        if mail.recipient.trim().is_empty() {
            return Err(MailError::MissingRecipient);
        }
        if self.settings.user.is_empty() || self.settings.password.is_empty() {
            return Err(MailError::MissingCredentials(self.settings.host.clone()));
        }

        let mut attached = 0;
        let mut skipped = 0;
        for path in &mail.attachments {
            match tokio::fs::metadata(path).await {
                Ok(meta) if meta.is_file() => attached += 1,
                _ => {
                    warn!("Attachment not found, skipping: {}", path.display());
                    skipped += 1;
                }
            }
        }
        if attached == 0 && skipped > 0 {
            return Err(MailError::NoAttachments(skipped));
        }

        info!(
            "Logged (not sent) '{}' from {} to {} for {}@{}:{} with {} attachment(s), {} byte body",
            mail.subject,
            self.settings.sender,
            mail.recipient,
            self.settings.user,
            self.settings.host,
            self.settings.port,
            attached,
            mail.body.len()
        );
        Ok(DispatchReceipt {
            via: "log",
            delivered: false,
            attached,
            skipped,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Captures every message and reports it as delivered.
    #[derive(Default)]
    pub struct RecordingDispatcher {
        pub sent: Mutex<Vec<OutgoingMail>>,
    }

    #[async_trait]
    impl MailDispatcher for RecordingDispatcher {
        async fn send(&self, mail: &OutgoingMail) -> Result<DispatchReceipt, MailError> {
            let attached = mail.attachments.iter().filter(|p| p.is_file()).count();
            self.sent.lock().unwrap().push(mail.clone());
            Ok(DispatchReceipt {
                via: "test",
                delivered: true,
                attached,
                skipped: mail.attachments.len() - attached,
            })
        }
    }
}
