//! La Igualitària - content site server

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use igualitaria::{cache::CacheConfig, config::Args, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing/logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("igualitaria={},info", args.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // A missing backend origin is fatal before binding
    let config = match args.validate() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("======================================");
    info!("  La Igualitària");
    info!("  Economat cooperatiu del Poble-sec");
    info!("======================================");
    info!("Instance ID: {}", config.instance_id);
    info!("Listen: {}", config.listen);
    info!("Backend: {}", config.api_url);
    info!("Site URL: {}", config.site_url);
    info!("Warm cache: {}", config.warm_cache);
    info!("======================================");

    let state = match server::AppState::from_config(config, CacheConfig::from_env()) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to create content client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
