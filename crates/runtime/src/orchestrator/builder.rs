//! Builder for [`HybridEngine`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::runtime::Handle;

use super::{AdvisorLink, HybridEngine};
use crate::advisor::ExternalAdvisor;
use crate::api::{Result, RuntimeError};
use crate::cache::DecisionCache;
use crate::clock::{Clock, MonotonicClock};
use crate::config::EngineConfig;
use crate::events::EventBus;

/// Builder for [`HybridEngine`] with flexible configuration.
#[derive(Default)]
pub struct HybridEngineBuilder {
    config: EngineConfig,
    clock: Option<Arc<dyn Clock>>,
    advisor: Option<Arc<ExternalAdvisor>>,
    runtime: Option<Handle>,
}

impl HybridEngineBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Time source. Defaults to [`MonotonicClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Use this advisor instead of building one from `config.advisor`.
    pub fn advisor(mut self, advisor: Arc<ExternalAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Runtime that background advisor queries are spawned on.
    ///
    /// Defaults to the runtime current at [`build`](Self::build) time.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Build the engine
    ///
    /// If no advisor was supplied and `config.advisor.enabled` is set, an HTTP
    /// advisor is built from `config.advisor`. The advisor starts unavailable
    /// until probed.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::AdvisorSetup`] if the HTTP backend cannot be built
    /// - [`RuntimeError::NoAsyncRuntime`] if an advisor exists but no tokio
    ///   runtime handle was given or is current
    pub fn build(self) -> Result<HybridEngine> {
        let events = EventBus::with_capacity(self.config.event_buffer_size.max(1));

        let advisor = match self.advisor {
            Some(advisor) => Some(advisor),
            None if self.config.advisor.enabled => Some(Arc::new(ExternalAdvisor::ollama(
                self.config.advisor.clone(),
            )?)),
            None => None,
        };

        let advisor = match advisor {
            Some(advisor) => {
                let runtime = match self.runtime {
                    Some(handle) => handle,
                    None => Handle::try_current().map_err(|_| RuntimeError::NoAsyncRuntime)?,
                };
                advisor.attach_events(events.clone());
                tracing::info!(provider = advisor.provider(), "advisor attached");
                Some(AdvisorLink { advisor, runtime })
            }
            None => {
                tracing::info!("no advisor configured, running local-only");
                None
            }
        };

        Ok(HybridEngine {
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(MonotonicClock::new())),
            config: self.config,
            cache: DecisionCache::new(),
            advisor,
            events,
            agents: HashMap::new(),
        })
    }
}
