//! The outbound seam to the application store.

use std::sync::{Arc, Mutex, mpsc};

use tracing::warn;

use crate::model::Combatant;

use super::{CombatState, CombatSummary};

/// Typed store actions emitted by a [`CombatSession`](super::CombatSession).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum StoreAction {
    SetCharacter(Combatant),
    SetOpponent(Combatant),
    UpdateCombatState(CombatState),
    SetCombatActive(bool),
    EndCombat(CombatSummary),
}

impl StoreAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetCharacter(_) => "SET_CHARACTER",
            Self::SetOpponent(_) => "SET_OPPONENT",
            Self::UpdateCombatState(_) => "UPDATE_COMBAT_STATE",
            Self::SetCombatActive(_) => "SET_COMBAT_ACTIVE",
            Self::EndCombat(_) => "END_COMBAT",
        }
    }
}

/// Receives every state change the engine reports.
pub trait Dispatcher: Send {
    fn dispatch(&mut self, action: StoreAction);
}

/// Discards everything.
impl Dispatcher for () {
    fn dispatch(&mut self, _action: StoreAction) {}
}

impl Dispatcher for Vec<StoreAction> {
    fn dispatch(&mut self, action: StoreAction) {
        self.push(action);
    }
}

impl Dispatcher for mpsc::Sender<StoreAction> {
    fn dispatch(&mut self, action: StoreAction) {
        let kind = action.kind();
        if self.send(action).is_err() {
            warn!(kind, "store receiver dropped; action discarded");
        }
    }
}

/// Dispatcher whose clones share one action list.
///
/// Hand one clone to the session and keep another to inspect what was sent.
#[derive(Clone, Debug, Default)]
pub struct RecordingDispatcher {
    actions: Arc<Mutex<Vec<StoreAction>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything dispatched so far.
    pub fn actions(&self) -> Vec<StoreAction> {
        self.actions
            .lock()
            .map(|actions| actions.clone())
            .unwrap_or_default()
    }

    /// Kinds of everything dispatched so far, in order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.actions().iter().map(StoreAction::kind).collect()
    }

    /// Drain the recorded actions.
    pub fn take(&self) -> Vec<StoreAction> {
        self.actions
            .lock()
            .map(|mut actions| std::mem::take(&mut *actions))
            .unwrap_or_default()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn dispatch(&mut self, action: StoreAction) {
        match self.actions.lock() {
            Ok(mut actions) => actions.push(action),
            Err(_) => warn!("recording dispatcher poisoned; action discarded"),
        }
    }
}
