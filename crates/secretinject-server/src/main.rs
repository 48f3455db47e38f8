//! Converter extension server.

use clap::Parser;
use secretinject_server::{AppState, ServerConfig, routes};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    anyhow::ensure!(!config.secret.is_empty(), "missing secret key");

    let state = AppState::new(config.secret.as_str());

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    info!("Starting server on {}", config.bind);

    let listener = TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
