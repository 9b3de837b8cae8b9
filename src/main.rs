//! Wiring & DI. Entry point: load config, build adapters, inject into services, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use votebot_gateway::adapters::http::{self, AppState};
use votebot_gateway::domain::FallbackCatalog;
use votebot_gateway::shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Fallback payloads: built-in, or overridden from a JSON file ---
    let catalog = match cfg.fallback_path.as_deref() {
        Some(path) => {
            let catalog = FallbackCatalog::from_json_file(Path::new(path))
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            info!(path, "loaded fallback catalog");
            catalog
        }
        None => FallbackCatalog::default(),
    };

    // --- Adapters + services ---
    let state = AppState::from_config(&cfg, Arc::new(catalog));

    // --- Serve ---
    http::serve(&cfg.bind_addr(), state).await
}
