use std::sync::Arc;

use crate::config::Config;
use crate::mailer::MailDispatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable mail transport. Default: LoggingDispatcher.
    pub mailer: Arc<dyn MailDispatcher>,
}
