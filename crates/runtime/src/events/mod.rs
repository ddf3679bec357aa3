//! Topic-based event bus for runtime events.
//!
//! Store actions dispatched by the session and the worker's own combat events
//! travel on separate topics, so a persistence layer never has to wade through
//! presentation traffic.

mod bus;
mod dispatcher;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use dispatcher::BusDispatcher;
pub use types::CombatEvent;
