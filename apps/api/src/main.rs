mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiBackend;
use crate::routes::build_router;
use crate::session::SessionState;
use crate::state::AppState;

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

    info!("Starting Coverly API v{}", env!("CARGO_PKG_VERSION"));

    let backend = Arc::new(OpenAiBackend::new());
    info!("Generation client initialized (model: {})", llm_client::MODEL);

    // The session starts gated: no pipeline operation succeeds before the
    // consent accept. The environment credential is consumed exactly once here.
    let session = SessionState::new(config.openai_api_key.as_deref());
    if session.has_api_key() {
        info!("Session credential seeded from environment");
    }

    let state = AppState {
        backend,
        session: Arc::new(Mutex::new(session)),
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
