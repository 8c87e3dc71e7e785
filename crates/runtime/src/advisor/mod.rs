//! External reasoning advisor.
//!
//! The advisor is an optional, slow and unreliable text-completion service.
//! [`ExternalAdvisor`] wraps a [`CompletionBackend`] and guarantees that a
//! query always produces an [`AdvisorResponse`]: failures are retried under a
//! per-attempt timeout and finally degrade to [`AdvisorResponse::fallback`].
//!
//! # Components
//!
//! - [`CompletionBackend`]: transport trait (`probe`, `complete`, `provider`)
//! - [`OllamaBackend`]: HTTP implementation
//! - [`ScriptedBackend`]: in-process backend replaying canned replies
//! - [`parse_reply`]: `ACTION | REASONING [| CONFIDENCE]` parser
//! - [`build_prompt`]: tick snapshot → prompt text

mod ollama;
mod parse;
mod prompt;
mod scripted;

pub use ollama::OllamaBackend;
pub use parse::{NO_REASONING, parse_reply};
pub use prompt::build_prompt;
pub use scripted::{ScriptedBackend, ScriptedReply};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use game_core::EntityId;
use tokio::task::JoinHandle;

use crate::config::AdvisorConfig;
use crate::decision::Action;
use crate::events::{AdvisorEvent, EventBus};

/// Decision text carried by fallback responses.
pub const FALLBACK_DECISION: &str = "FALLBACK";
/// Provider name carried by fallback responses.
pub const FALLBACK_PROVIDER: &str = "fallback";

/// Errors raised by a single advisor attempt.
///
/// These never leave [`ExternalAdvisor::query`]; they are logged, retried and
/// finally folded into a fallback response.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("advisor unavailable")]
    Unavailable,

    #[error("advisor timed out after {0} ms")]
    Timeout(u64),

    #[error("advisor returned HTTP {0}")]
    Status(u16),

    #[error("advisor transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("advisor backend error: {0}")]
    Backend(String),
}

/// Text-completion transport behind the advisor.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Name recorded on every response, e.g. `ollama`.
    fn provider(&self) -> &str;

    /// Cheap reachability check. `Ok` means the service can take queries.
    async fn probe(&self) -> Result<(), AdvisorError>;

    /// Completes `prompt`, returning the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Parsed advisor reply.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvisorResponse {
    /// Upper-cased action name, or [`FALLBACK_DECISION`].
    pub decision: String,
    pub reasoning: String,
    /// In `[0, 1]`; always `0` for fallbacks.
    pub confidence: f64,
    pub provider: String,
    pub latency_ms: u64,
}

impl AdvisorResponse {
    /// Degraded response used whenever the advisor could not answer.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            decision: FALLBACK_DECISION.to_string(),
            reasoning: reason.into(),
            confidence: 0.0,
            provider: FALLBACK_PROVIDER.to_string(),
            latency_ms: 0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provider == FALLBACK_PROVIDER || self.decision == FALLBACK_DECISION
    }

    /// The suggested action. Unknown names become [`Action::Custom`].
    pub fn action(&self) -> Action {
        match self.decision.parse() {
            Ok(action) => action,
            Err(never) => match never {},
        }
    }
}

/// Advisor client with availability tracking and per-agent cooldown.
pub struct ExternalAdvisor {
    backend: Arc<dyn CompletionBackend>,
    config: AdvisorConfig,
    available: AtomicBool,
    reservations: Mutex<HashMap<EntityId, u64>>,
    events: OnceLock<EventBus>,
}

impl ExternalAdvisor {
    /// Wraps `backend`. The advisor starts unavailable until the first probe.
    pub fn new(backend: Arc<dyn CompletionBackend>, config: AdvisorConfig) -> Self {
        Self {
            backend,
            config,
            available: AtomicBool::new(false),
            reservations: Mutex::new(HashMap::new()),
            events: OnceLock::new(),
        }
    }

    /// Builds an advisor over the HTTP backend described by `config`.
    pub fn ollama(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        let backend = OllamaBackend::new(&config)?;
        Ok(Self::new(Arc::new(backend), config))
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn provider(&self) -> &str {
        self.backend.provider()
    }

    /// Routes availability changes to `bus`. Only the first call takes effect.
    pub fn attach_events(&self, bus: EventBus) {
        let _ = self.events.set(bus);
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Forces the availability flag, e.g. from an external health check.
    pub fn set_available(&self, available: bool) {
        let previous = self.available.swap(available, Ordering::AcqRel);
        if previous != available {
            tracing::info!(
                provider = self.provider(),
                available,
                "advisor availability changed"
            );
            if let Some(bus) = self.events.get() {
                bus.publish_advisor(AdvisorEvent::AvailabilityChanged { available });
            }
        }
    }

    /// Probes the backend under the probe timeout and stores the result.
    pub async fn refresh_availability(&self) -> bool {
        let timeout = Duration::from_millis(self.config.probe_timeout_ms);
        let available = match tokio::time::timeout(timeout, self.backend.probe()).await {
            Ok(Ok(())) => true,
            Ok(Err(error)) => {
                tracing::debug!(%error, "advisor probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(timeout_ms = self.config.probe_timeout_ms, "advisor probe timed out");
                false
            }
        };

        self.set_available(available);
        available
    }

    /// Re-probes every `probe_interval_ms` until the advisor is dropped.
    ///
    /// The first probe runs immediately.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn_probe_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let advisor = Arc::downgrade(self);
        let period = Duration::from_millis(self.config.probe_interval_ms.max(1));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let Some(advisor) = advisor.upgrade() else {
                    break;
                };
                advisor.refresh_availability().await;
            }
        })
    }

    /// Claims the agent's query slot if its cooldown has elapsed.
    ///
    /// # Returns
    ///
    /// `true` if the caller may launch a query now. The slot is consumed.
    pub fn try_reserve(&self, agent: EntityId, now_ms: u64) -> bool {
        let mut reservations = match self.reservations.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(&last) = reservations.get(&agent)
            && now_ms.saturating_sub(last) < self.config.cooldown_ms
        {
            return false;
        }

        reservations.insert(agent, now_ms);
        true
    }

    /// Asks the advisor. Never fails.
    ///
    /// Each attempt runs under `timeout_ms`. Failed attempts are retried up to
    /// `max_attempts` in total with `retry_delay_ms` between them; exhaustion
    /// yields [`AdvisorResponse::fallback`]. While the advisor is unavailable
    /// the fallback is returned without touching the backend.
    pub async fn query(&self, prompt: &str) -> AdvisorResponse {
        if !self.is_available() {
            return AdvisorResponse::fallback(AdvisorError::Unavailable.to_string());
        }

        let attempts = self.config.max_attempts.max(1);
        let timeout = Duration::from_millis(self.config.timeout_ms);
        let started = Instant::now();
        let mut last_error = AdvisorError::Unavailable;

        for attempt in 1..=attempts {
            let result = match tokio::time::timeout(timeout, self.backend.complete(prompt)).await {
                Ok(result) => result,
                Err(_) => Err(AdvisorError::Timeout(self.config.timeout_ms)),
            };

            match result {
                Ok(raw) => {
                    let mut response =
                        parse_reply(&raw, self.config.default_confidence, self.provider());
                    response.latency_ms = started.elapsed().as_millis() as u64;
                    return response;
                }
                Err(error) => {
                    tracing::warn!(attempt, attempts, %error, "advisor attempt failed");
                    last_error = error;
                }
            }

            if attempt < attempts {
                tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
            }
        }

        AdvisorResponse::fallback(format!("retries exhausted: {last_error}"))
    }
}
