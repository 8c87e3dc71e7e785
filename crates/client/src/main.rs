//! Arena client binary.
//!
//! Composition root: loads configuration, sets up logging, builds the hybrid
//! engine (with the HTTP advisor when `ADVISOR_ENABLED` is set) and plays a
//! scenario through it.
//!
//! # Examples
//!
//! ```bash
//! # Built-in skirmish, local heuristics only
//! cargo run -p arena-client
//!
//! # With a local completion service and a scenario file
//! ADVISOR_ENABLED=true ARENA_SCENARIO=duel.json cargo run -p arena-client
//! ```

use anyhow::{Context, Result};
use arena_client::{ArenaConfig, Client, Scenario, logging};
use decision_runtime::{EngineConfig, HybridEngine};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let arena_config = ArenaConfig::from_env();
    let engine_config = EngineConfig::from_env();

    // 2. Setup logging
    let (session_id, _log_guard) = logging::setup_logging(&arena_config)?;

    tracing::info!("Starting arena client");
    tracing::info!("Session ID: {}", session_id);
    tracing::info!("Default difficulty: {}", engine_config.ai.difficulty);
    tracing::info!(
        "Advisor: {}",
        if engine_config.advisor.enabled {
            engine_config.advisor.base_url.as_str()
        } else {
            "disabled"
        }
    );

    // 3. Load scenario
    let scenario = match &arena_config.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::skirmish(),
    };
    tracing::info!("Scenario: {} ({} agents)", scenario.name, scenario.agents.len());

    // 4. Build engine
    let engine = HybridEngine::builder()
        .config(engine_config)
        .build()
        .context("Failed to build decision engine")?;

    // 5. Assemble and run
    let client = Client::builder()
        .engine(engine)
        .scenario(scenario)
        .arena(&arena_config)
        .build()?;

    client.run().await?;

    tracing::info!("Arena client shutdown complete");
    Ok(())
}
