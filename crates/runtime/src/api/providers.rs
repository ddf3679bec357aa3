//! Asynchronous abstraction for sourcing the player's intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a combat can be
//! driven by keyboard input, a scripted fixture, or anything else.
use std::collections::VecDeque;

use async_trait::async_trait;
use combat_core::{CombatSnapshot, CombatType, PlayerAction};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::errors::{Result, RuntimeError};

/// One request from the player's side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    SelectCombatType(CombatType),
    Act(PlayerAction),
    /// Leave the finished combat.
    ReturnToNarrative,
}

/// Trait for providing the player's next intent.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide the next intent given a read-only snapshot of the session.
    async fn provide_intent(&self, snapshot: &CombatSnapshot) -> Result<PlayerIntent>;
}

/// Replays a fixed list of intents, then reports a closed channel.
pub struct ScriptedProvider {
    intents: Mutex<VecDeque<PlayerIntent>>,
}

impl ScriptedProvider {
    pub fn new(intents: impl IntoIterator<Item = PlayerIntent>) -> Self {
        Self {
            intents: Mutex::new(intents.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_intent(&self, _snapshot: &CombatSnapshot) -> Result<PlayerIntent> {
        self.intents
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ActionProviderChannelClosed)
    }
}
