//! Client builder with dependency injection pattern.

use std::time::Duration;

use anyhow::{Context, Result};
use decision_runtime::HybridEngine;

use crate::config::ArenaConfig;
use crate::{Client, Scenario};

/// Builder for constructing a [`Client`] with validation.
///
/// Engine and scenario are required; pacing defaults to [`ArenaConfig`]'s.
pub struct ClientBuilder {
    engine: Option<HybridEngine>,
    scenario: Option<Scenario>,
    tick_interval: Duration,
    ticks: u32,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        let defaults = ArenaConfig::default();
        Self {
            engine: None,
            scenario: None,
            tick_interval: Duration::from_millis(defaults.tick_ms),
            ticks: defaults.ticks,
        }
    }
}

impl ClientBuilder {
    /// Create a new ClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine (required).
    ///
    /// Agents are registered from the scenario when the client runs, so the
    /// engine should not already know them.
    pub fn engine(mut self, engine: HybridEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Set the scenario (required).
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Take tick pacing from `config`.
    pub fn arena(self, config: &ArenaConfig) -> Self {
        self.tick_interval(Duration::from_millis(config.tick_ms.max(1)))
            .ticks(config.ticks)
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Engine is not set (required)
    /// - Scenario is not set (required) or fails validation
    /// - The tick interval is zero
    pub fn build(self) -> Result<Client> {
        let engine = self
            .engine
            .context("Engine is required. Use .engine() to set it.")?;

        let scenario = self
            .scenario
            .context("Scenario is required. Use .scenario() to set it.")?;
        scenario.validate()?;

        anyhow::ensure!(!self.tick_interval.is_zero(), "Tick interval must be positive");

        Ok(Client {
            engine,
            scenario,
            tick_interval: self.tick_interval,
            ticks: self.ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> HybridEngine {
        HybridEngine::builder().build().expect("local-only engine")
    }

    #[test]
    fn engine_and_scenario_are_required() {
        let err = ClientBuilder::new()
            .scenario(Scenario::skirmish())
            .build()
            .err()
            .expect("missing engine");
        assert!(err.to_string().contains("Engine is required"));

        let err = ClientBuilder::new().engine(engine()).build().err().expect("missing scenario");
        assert!(err.to_string().contains("Scenario is required"));
    }

    #[test]
    fn arena_config_sets_pacing() {
        let config = ArenaConfig {
            tick_ms: 250,
            ticks: 7,
            ..ArenaConfig::default()
        };
        let client = ClientBuilder::new()
            .engine(engine())
            .scenario(Scenario::skirmish())
            .arena(&config)
            .build()
            .expect("client should build");

        assert_eq!(client.tick_interval, Duration::from_millis(250));
        assert_eq!(client.ticks, 7);
    }
}
