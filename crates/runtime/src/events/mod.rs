//! Topic-based event bus for engine events.
//!
//! Events are published to fixed topics and consumers subscribe only to the
//! topics they need. Publishing never blocks and never fails; events without
//! subscribers are dropped.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{AdvisorEvent, DecisionEvent};
