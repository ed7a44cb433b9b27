mod config;
mod db;
mod errors;
mod intake;
mod llm_client;
mod models;
mod questions;
mod routes;
mod state;
mod storage;

#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::intake::session::IntakeService;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::fallback::FallbackLog;
use crate::storage::gateway::PersistenceGateway;
use crate::storage::remote::{PgCandidateStore, RemoteStore, UnconfiguredStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout API v{}", env!("CARGO_PKG_VERSION"));

    // Remote datastore, or fallback-only when no database is configured
    let remote: Arc<dyn RemoteStore> = match &config.database_url {
        Some(url) => Arc::new(PgCandidateStore::new(create_pool(url)?)),
        None => {
            warn!("DATABASE_URL not set; applications will be written to the fallback log");
            Arc::new(UnconfiguredStore)
        }
    };

    let fallback = FallbackLog::new(&config.fallback_log_path);
    info!("Fallback log at {}", fallback.path().display());
    let gateway = Arc::new(PersistenceGateway::new(remote, fallback));

    // Initialize LLM client
    let llm = LlmClient::new(
        &config.llm_base_url,
        config.llm_model.clone(),
        config.llm_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.llm_timeout.as_secs()
    );

    let intake = Arc::new(IntakeService::new(
        Arc::new(llm),
        gateway.clone(),
        config.question_fallback,
        config.session_idle_ttl,
    ));

    let state = AppState {
        intake,
        gateway,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the intake frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
