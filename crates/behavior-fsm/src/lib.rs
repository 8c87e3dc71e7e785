//! Lightweight guarded state machine for tick-driven game agents.
//!
//! The machine is deliberately small and deterministic:
//!
//! - **Explicit graph**: every allowed edge is declared up front in a
//!   [`TransitionTable`]; anything else is rejected
//! - **Guarded edges**: each edge carries a predicate over a caller-defined
//!   context type `C`
//! - **First match wins**: [`StateMachine::update`] takes the first edge (in
//!   declaration order) whose guard holds
//! - **Bounded history**: successful transitions are kept in a fixed-size ring
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`StateMachine`]: current state, table and history
//! - [`TransitionTable`]: adjacency table with guards
//! - [`TransitionOutcome`]: result of a requested transition
//! - [`TransitionHistory`] / [`TransitionRecord`]: ring buffer of past moves

pub mod history;
pub mod machine;
pub mod outcome;
pub mod table;

// Re-export core types for ergonomic API
pub use history::{TransitionHistory, TransitionRecord};
pub use machine::StateMachine;
pub use outcome::TransitionOutcome;
pub use table::{Edge, Guard, TransitionTable};
