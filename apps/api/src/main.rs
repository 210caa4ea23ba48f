mod auth;
mod config;
mod db;
mod errors;
mod export;
mod intake;
mod models;
mod notify;
mod pipeline;
mod reconcile;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::intake::extractor::HttpExtractor;
use crate::notify::mailer::SmtpNotifier;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("ats_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize SMTP mail transport
    let notifier = Arc::new(SmtpNotifier::new(
        &config.smtp_host,
        config.smtp_username.clone(),
        config.smtp_password.clone(),
        &config.mail_from,
    )?);
    info!("SMTP transport initialized ({})", config.smtp_host);

    // Initialize the external resume extraction client
    let extractor = Arc::new(HttpExtractor::new(config.extractor_url.clone()));
    info!("Extractor client initialized ({})", config.extractor_url);

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        notifier,
        extractor,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
