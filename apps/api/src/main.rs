mod config;
mod enrichment;
mod errors;
mod remote;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enrichment::service::EnrichmentService;
use crate::remote::analysis::AnalysisClient;
use crate::remote::transcription::TranscriptionClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireFlow enrichment API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client shared by both remote clients. The 120s request
    // timeout covers audio uploads; poll attempts are bounded separately
    // by the orchestrator's per-attempt timeout.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;

    let transcription = TranscriptionClient::new(http.clone(), config.assemblyai_api_key.clone());
    info!("Transcription client initialized");

    let analysis = AnalysisClient::new(http, config.groq_api_key.clone());
    info!("Analysis client initialized (model: {})", remote::analysis::MODEL);

    let enrichment = Arc::new(EnrichmentService::new(transcription, analysis));

    // Build app state
    let state = AppState { enrichment };

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
