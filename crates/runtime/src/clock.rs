//! Session clock backed by tokio time.
//!
//! Timestamps are milliseconds since the clock was created. Under
//! `tokio::time::pause` the clock follows the paused time, which keeps
//! pacing tests instantaneous.

use std::time::Duration;

use combat_core::{Clock, Timestamp};
use tokio::time::Instant;

#[derive(Clone, Copy, Debug)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Instant at which `timestamp` is reached.
    pub fn instant_at(&self, timestamp: Timestamp) -> Instant {
        self.origin + Duration::from_millis(timestamp.millis())
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Timestamp {
        let elapsed = self.origin.elapsed().as_millis();
        Timestamp(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}
