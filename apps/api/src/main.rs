mod config;
mod errors;
mod layout;
mod llm_client;
mod output;
mod proposal;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, RetryPolicy};
use crate::render::FontAsset;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting proposal API v{}", env!("CARGO_PKG_VERSION"));

    // The PDF endpoint cannot work without the embedded font; refuse to start.
    let font = FontAsset::load(&config.font_path)?;
    info!("Font loaded from {}", config.font_path.display());

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("cannot create output dir {}", config.output_dir.display()))?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.llm_timeout,
        RetryPolicy {
            max_attempts: config.llm_max_attempts,
            ..RetryPolicy::default()
        },
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?}, attempts: {})",
        llm_client::MODEL,
        config.llm_timeout,
        config.llm_max_attempts
    );

    if config.report_retention.is_zero() {
        info!("Report retention sweep disabled");
    } else {
        info!(
            "Sweeping reports older than {:?} every {:?}",
            config.report_retention, config.report_sweep_interval
        );
        tokio::spawn(output::run_retention_sweeper(
            config.output_dir.clone(),
            config.report_retention,
            config.report_sweep_interval,
        ));
    }

    let port = config.port;

    // Build app state
    let state = AppState {
        generator: Arc::new(llm),
        font,
        config: Arc::new(config),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
