mod compose_client;
mod config;
mod db;
mod engine;
mod errors;
mod funnel;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compose_client::ComposeClient;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::ChatClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Solisa Agentic Engine API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize PostgreSQL and the funnel schema
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Initialize the SMS composition upstream
    let composer = ComposeClient::new(
        config.compose_api_url.clone(),
        config.compose_api_key.clone(),
    );
    info!(
        "Compose client initialized (configured: {})",
        composer.is_configured()
    );

    // Initialize the chat-completion upstream for follow-up emails
    let chat = ChatClient::new(
        config.chat_api_url.clone(),
        config.chat_api_key.clone(),
        config.chat_model.clone(),
    );
    info!(
        "Chat client initialized (model: {}, configured: {})",
        chat.model(),
        chat.is_configured()
    );

    // Build app state
    let state = AppState { db, composer, chat };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // demo service, no origin restrictions

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
