//! Events published by the combat worker.

use combat_core::{CombatLogEntry, CombatSummary, CombatType, HalfTurn, Side, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    TypeSelected {
        combat_type: CombatType,
    },

    /// A half-turn was resolved, by either side.
    TurnResolved {
        actor: Side,
        entry: CombatLogEntry,
        damage: u32,
        knockout: bool,
    },

    /// The opponent will act at `due_at` on the session clock.
    OpponentScheduled {
        due_at: Timestamp,
    },

    /// A scheduled opponent turn was dropped.
    OpponentCancelled,

    /// A request was refused; the session is unchanged.
    ActionRejected {
        request: String,
        code: String,
        reason: String,
    },

    ReturnedToNarrative {
        summary: CombatSummary,
    },
}

impl CombatEvent {
    pub fn turn_resolved(turn: &HalfTurn) -> Self {
        Self::TurnResolved {
            actor: turn.actor,
            entry: turn.entry.clone(),
            damage: turn.damage,
            knockout: turn.knockout,
        }
    }
}
