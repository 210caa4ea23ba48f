use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::intake::extractor::Extractor;
use crate::notify::mailer::Notifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable mail transport. Default: SmtpNotifier. All outbound mail —
    /// campaign fan-out and report attachments — goes through this seam.
    pub notifier: Arc<dyn Notifier>,
    /// External resume-to-fields extraction service client.
    pub extractor: Arc<dyn Extractor>,
}
