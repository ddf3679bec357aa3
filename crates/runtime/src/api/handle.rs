//! Cloneable façade for issuing commands to the combat worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use std::collections::HashMap;

use combat_core::{CombatSnapshot, CombatSummary, CombatType, HalfTurn, PlayerAction};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Choose brawling or weapon combat. Allowed once per encounter.
    pub async fn select_combat_type(&self, combat_type: CombatType) -> Result<()> {
        self.request(|reply| Command::SelectCombatType { combat_type, reply })
            .await??;
        Ok(())
    }

    /// Resolve the player's half-turn and schedule the opponent's reply.
    pub async fn submit(&self, action: PlayerAction) -> Result<HalfTurn> {
        Ok(self
            .request(|reply| Command::Submit { action, reply })
            .await??)
    }

    /// Read-only snapshot of the session.
    pub async fn inspect(&self) -> Result<CombatSnapshot> {
        self.request(|reply| Command::Inspect { reply }).await
    }

    /// Leave a finished combat, returning its summary.
    pub async fn return_to_narrative(&self) -> Result<CombatSummary> {
        Ok(self
            .request(|reply| Command::ReturnToNarrative { reply })
            .await??)
    }

    /// Drop a scheduled opponent turn. Returns whether one was pending.
    pub async fn cancel_pending(&self) -> Result<bool> {
        self.request(|reply| Command::CancelPending { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Store` - store actions dispatched by the session
    /// - `Topic::Combat` - resolved turns, scheduling and rejections
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use combat_runtime::Topic;
    ///
    /// let mut store_rx = handle.subscribe(Topic::Store);
    /// while let Ok(event) = store_rx.recv().await {
    ///     // persist the dispatched state
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
