mod config;
mod errors;
mod routes;
mod sheet;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sheetforge v{}", env!("CARGO_PKG_VERSION"));

    // Per-request documents land here before being streamed back
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Cannot create OUTPUT_DIR {}", config.output_dir.display()))?;

    // A missing template is reported per request, not fatal at startup
    if tokio::fs::metadata(&config.template_path).await.is_err() {
        warn!(
            path = %config.template_path.display(),
            "Character sheet template not found; render requests will fail until it exists"
        );
    } else {
        info!("Template: {}", config.template_path.display());
    }

    let state = AppState::new(config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
