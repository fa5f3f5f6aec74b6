mod config;
mod errors;
mod llm_client;
mod quiz;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmRouter;
use crate::quiz::bank::QuestionBank;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first; only malformed values are fatal
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting skill recommendation API v{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let bank = QuestionBank::load(config.question_bank_path.as_deref())?;

    let llm = LlmRouter::from_config(&config.llm)?;
    if llm.configured().is_empty() {
        warn!("No LLM API keys configured; recommendations will use canned text");
    }

    if !config.frontend_dir.join("index.html").exists() {
        warn!(
            "Dashboard not found at {}; only the JSON API will be useful",
            config.frontend_dir.display()
        );
    }

    let state = AppState {
        bank: Arc::new(bank),
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
