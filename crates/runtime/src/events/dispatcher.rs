use combat_core::{Dispatcher, StoreAction};
use tracing::trace;

use super::{Event, EventBus};

/// Forwards session store actions onto [`Topic::Store`](super::Topic::Store).
#[derive(Clone)]
pub struct BusDispatcher {
    bus: EventBus,
}

impl BusDispatcher {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl Dispatcher for BusDispatcher {
    fn dispatch(&mut self, action: StoreAction) {
        trace!(kind = action.kind(), "dispatching store action");
        self.bus.publish(Event::Store(action));
    }
}
