mod config;
mod errors;
mod generation;
mod llm;
mod models;
mod render;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::orchestrator::Pipeline;
use crate::llm::LlmGateway;
use crate::render::TemplateRegistry;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::profiles::ProfileStore;
use crate::store::prompts::PromptStore;

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

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    let pipeline = Pipeline {
        profiles: Arc::new(ProfileStore::new(&config.profiles_dir)),
        prompts: Arc::new(PromptStore::new(&config.prompts_dir)),
        llm: Arc::new(LlmGateway::new(&config)),
        templates: Arc::new(TemplateRegistry::new()),
    };

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
