//! Engine configuration structures and environment loaders.
//!
//! Configuration is assembled once (defaults, then environment overrides) and
//! handed to [`crate::HybridEngineBuilder`]. Nothing reads the environment
//! after construction.
use std::env;

use game_core::{AiConfig, Difficulty};

/// Configuration shared by every agent the engine drives.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Default AI tuning for agents registered without an explicit config.
    pub ai: AiConfig,
    pub advisor: AdvisorConfig,
    /// Capacity of each broadcast topic.
    pub event_buffer_size: usize,
    /// Seed for the decision makers' dice. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            advisor: AdvisorConfig::default(),
            event_buffer_size: 128,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AI_DIFFICULTY` - easy | normal | hard | expert (default: normal)
    /// - `AI_DECISION_INTERVAL_MS` - Override the tier's decision interval
    /// - `AI_RNG_SEED` - Fixed seed for strategy rolls (default: entropy)
    /// - `ENGINE_EVENT_BUFFER` - Broadcast capacity per topic (default: 128)
    /// - `ADVISOR_*` - See [`AdvisorConfig::from_env`]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(difficulty) = read_env::<Difficulty>("AI_DIFFICULTY") {
            config.ai = AiConfig::new(difficulty);
        }

        if let Some(interval) = read_env::<u64>("AI_DECISION_INTERVAL_MS") {
            config.ai = config.ai.with_decision_interval(interval);
        }

        config.rng_seed = read_env::<u64>("AI_RNG_SEED");

        if let Some(capacity) = read_env::<usize>("ENGINE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config.advisor = AdvisorConfig::from_env();

        config
    }
}

/// Settings for the external text-completion advisor.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvisorConfig {
    /// Build an advisor at all. When false the engine runs local-only.
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    /// Per-attempt request timeout.
    pub timeout_ms: u64,
    /// Timeout for the availability probe.
    pub probe_timeout_ms: u64,
    /// Total attempts per query before degrading to the fallback.
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    /// Minimum spacing between queries for the same agent.
    pub cooldown_ms: u64,
    pub num_predict: u32,
    pub temperature: f32,
    /// Confidence attached to parsed replies that carry none of their own.
    pub default_confidence: f64,
    /// Period of the background availability probe.
    pub probe_interval_ms: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_ms: 2000,
            probe_timeout_ms: 500,
            max_attempts: 2,
            retry_delay_ms: 100,
            cooldown_ms: 3000,
            num_predict: 64,
            temperature: 0.3,
            default_confidence: 0.8,
            probe_interval_ms: 30_000,
        }
    }
}

impl AdvisorConfig {
    /// Construct advisor configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ADVISOR_ENABLED` - Enable the advisor (default: false)
    /// - `ADVISOR_BASE_URL` - Service root (default: http://localhost:11434)
    /// - `ADVISOR_MODEL` - Model name sent with each request
    /// - `ADVISOR_TIMEOUT_MS` - Per-attempt timeout (default: 2000)
    /// - `ADVISOR_PROBE_TIMEOUT_MS` - Availability probe timeout (default: 500)
    /// - `ADVISOR_MAX_ATTEMPTS` - Attempts before fallback (default: 2, min 1)
    /// - `ADVISOR_RETRY_DELAY_MS` - Pause between attempts (default: 100)
    /// - `ADVISOR_COOLDOWN_MS` - Per-agent query spacing (default: 3000)
    /// - `ADVISOR_NUM_PREDICT` - Completion token budget (default: 64)
    /// - `ADVISOR_TEMPERATURE` - Sampling temperature (default: 0.3)
    /// - `ADVISOR_PROBE_INTERVAL_MS` - Background probe period (default: 30000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(enabled) = read_env::<bool>("ADVISOR_ENABLED") {
            config.enabled = enabled;
        } else if env::var("ADVISOR_ENABLED").is_ok() {
            // Accept a bare `ADVISOR_ENABLED=` as "true"
            config.enabled = true;
        }

        if let Ok(url) = env::var("ADVISOR_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(model) = env::var("ADVISOR_MODEL") {
            config.model = model;
        }

        if let Some(timeout) = read_env::<u64>("ADVISOR_TIMEOUT_MS") {
            config.timeout_ms = timeout.max(1);
        }

        if let Some(timeout) = read_env::<u64>("ADVISOR_PROBE_TIMEOUT_MS") {
            config.probe_timeout_ms = timeout.max(1);
        }

        if let Some(attempts) = read_env::<u32>("ADVISOR_MAX_ATTEMPTS") {
            config.max_attempts = attempts.max(1);
        }

        if let Some(delay) = read_env::<u64>("ADVISOR_RETRY_DELAY_MS") {
            config.retry_delay_ms = delay;
        }

        if let Some(cooldown) = read_env::<u64>("ADVISOR_COOLDOWN_MS") {
            config.cooldown_ms = cooldown;
        }

        if let Some(tokens) = read_env::<u32>("ADVISOR_NUM_PREDICT") {
            config.num_predict = tokens.max(1);
        }

        if let Some(temperature) = read_env::<f32>("ADVISOR_TEMPERATURE") {
            config.temperature = temperature.clamp(0.0, 2.0);
        }

        if let Some(interval) = read_env::<u64>("ADVISOR_PROBE_INTERVAL_MS") {
            config.probe_interval_ms = interval.max(100);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_advisor_disabled() {
        let config = EngineConfig::default();
        assert!(!config.advisor.enabled);
        assert_eq!(config.ai.difficulty, Difficulty::Normal);
        assert!(config.advisor.max_attempts >= 1);
    }
}
