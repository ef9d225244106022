//! Matchmaker server
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Store   │───▶│  Engine  │───▶│ Gateway  │
//! │  (YAML)  │    │(mem / pg)│    │ (Match)  │    │  (HTTP)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `matchmaker [--env <name>]` (reads `config/<name>.yaml`, default `dev`)

use std::sync::Arc;

use anyhow::Context;

use matchmaker::config::AppConfig;
use matchmaker::engine::MatchEngine;
use matchmaker::queue_store::build_store;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env).context("Failed to load configuration")?;
    let _log_guard = matchmaker::logging::init_logging(&app_config);

    tracing::info!(
        env = %env,
        storage = ?app_config.storage,
        group_size = app_config.group_size,
        "Starting matchmaker"
    );

    let store = build_store(&app_config)
        .await
        .context("Failed to initialize queue store")?;
    let engine = Arc::new(
        MatchEngine::new(store, app_config.group_size).context("Failed to create match engine")?,
    );

    matchmaker::gateway::run_server(&app_config.gateway.address, engine).await
}
