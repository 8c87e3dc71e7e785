//! Unified error types surfaced by the runtime API.
//!
//! Only caller mistakes and construction failures surface here. Advisor query
//! failures, cache misses and rejected transitions are normal runtime
//! outcomes and never become errors.
use game_core::EntityId;
use thiserror::Error;

use crate::advisor::AdvisorError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("agent {0} is not registered with the engine")]
    UnknownAgent(EntityId),

    #[error("agent {0} is already registered with the engine")]
    DuplicateAgent(EntityId),

    #[error("an advisor is configured but no tokio runtime is available to spawn queries on")]
    NoAsyncRuntime,

    #[error("failed to build advisor backend: {0}")]
    AdvisorSetup(#[from] AdvisorError),
}
