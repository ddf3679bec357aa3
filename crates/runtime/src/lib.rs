//! Async runtime shell around a [`combat_core::CombatSession`].
//!
//! The session itself is synchronous and clock-driven. This crate owns it on a
//! tokio worker task, paces the opponent's counter-turn in real time, and
//! republishes every dispatched store action on a topic-based event bus.
//! Consumers embed [`Runtime`] to drive the player's side through an
//! [`ActionProvider`], or talk to the worker directly through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`clock`] adapts tokio time to the session clock
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, PlayerIntent, Result, RuntimeError, RuntimeHandle, ScriptedProvider};
pub use clock::TokioClock;
pub use events::{BusDispatcher, CombatEvent, Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
