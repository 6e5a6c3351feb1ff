use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::mailer::SmtpSettings;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub smtp: SmtpSettings,
    /// Parent directory for per-request letter output.
    pub letter_output_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let smtp_user = require_env("SMTP_USER")?;
        let smtp = SmtpSettings {
            host: require_env("SMTP_HOST")?,
            port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "465".to_string())
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            password: require_env("SMTP_PASSWORD")?,
            sender: std::env::var("MAIL_SENDER").unwrap_or_else(|_| smtp_user.clone()),
            user: smtp_user,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            smtp,
            letter_output_dir: std::env::var("LETTER_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    /// Config for handler tests; writes under `output_dir`.
    pub fn for_tests(output_dir: PathBuf) -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            smtp: SmtpSettings {
                host: "localhost".to_string(),
                port: 465,
                user: "letters@example.com".to_string(),
                password: "secret".to_string(),
                sender: "letters@example.com".to_string(),
            },
            letter_output_dir: output_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
