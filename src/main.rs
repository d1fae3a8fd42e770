use anyhow::{Context as _, Result};
use clap::Parser as _;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use u_triage::api;
use u_triage::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(date) = config.reference_date {
        tracing::info!(%date, "reference date pinned");
    }

    api::serve(config.addr, config.app_state())
        .await
        .with_context(|| format!("failed to serve on {}", config.addr))
}
