//! Hybrid decision runtime for arena heroes.
//!
//! Once per tick and per agent, the runtime combines a fast local heuristic
//! evaluator with an optional, slow, unreliable external advisor, without ever
//! blocking the tick. Consumers build a [`HybridEngine`], register agents and
//! call [`HybridEngine::tick`] with fresh snapshots.
//!
//! Modules are organized by responsibility:
//! - [`evaluator`] scores ten situational layers into an urgency mode
//! - [`decision`] analyzes the raw world view and picks local actions
//! - [`behavior`] defines hero behavior states and their transition graph
//! - [`cache`] memoizes fused decisions per agent
//! - [`advisor`] talks to the external completion service
//! - [`fusion`] merges advisor replies with local decisions
//! - [`orchestrator`] hosts the engine and its builder
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`api`] exposes the error types downstream clients interact with
pub mod advisor;
pub mod api;
pub mod behavior;
pub mod cache;
pub mod clock;
pub mod config;
pub mod decision;
pub mod evaluator;
pub mod events;
pub mod fusion;
pub mod orchestrator;

pub use advisor::{
    AdvisorError, AdvisorResponse, CompletionBackend, ExternalAdvisor, OllamaBackend,
    ScriptedBackend, ScriptedReply,
};
pub use api::{Result, RuntimeError};
pub use behavior::{HeroBehavior, HeroStateMachine};
pub use cache::{CacheEntry, DecisionCache};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{AdvisorConfig, EngineConfig};
pub use decision::{Action, Aggressiveness, Decision, DecisionMaker, FusionType, Situation};
pub use evaluator::{Evaluation, Evaluator, Layer, LayerScores, UrgencyMode, Weights};
pub use events::{AdvisorEvent, DecisionEvent, Event, EventBus, Topic};
pub use orchestrator::{HybridEngine, HybridEngineBuilder, Route, TickInput, TickOutcome};
