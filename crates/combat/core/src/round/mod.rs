//! Round processors for brawling and weapon combat.
//!
//! A processor owns its mode's state ([`BrawlingState`] or
//! [`WeaponCombatState`]) and resolves one half-turn at a time for either
//! side. Each half-turn appends exactly one log entry and returns a
//! [`HalfTurn`] describing the delta, which the session forwards to the
//! application store.

mod brawling;
mod weapon;

pub use brawling::BrawlingState;
pub use weapon::{WeaponAction, WeaponActionKind, WeaponCombatState, WeaponSlot};

pub use crate::resolution::BrawlingAction;

use crate::log::CombatLogEntry;
use crate::model::{Combatant, Side, Wound};

/// Result of one side's action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HalfTurn {
    pub actor: Side,
    /// The entry appended to the round log.
    pub entry: CombatLogEntry,
    /// Damage dealt to the other side.
    pub damage: u32,
    /// Wound appended to the other side, if any.
    pub wound: Option<Wound>,
    /// The other side's strength after the action.
    pub target_strength: u32,
    /// Whether the other side was knocked out by this action.
    pub knockout: bool,
}

impl HalfTurn {
    pub fn target(&self) -> Side {
        self.actor.opposite()
    }

    /// Winner implied by this half-turn, if it ended the fight.
    pub fn winner(&self) -> Option<Side> {
        self.knockout.then_some(self.actor)
    }
}

/// Both participants of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fighters {
    pub player: Combatant,
    pub opponent: Combatant,
}

impl Fighters {
    pub fn new(player: Combatant, opponent: Combatant) -> Self {
        Self { player, opponent }
    }

    pub fn get(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// The acting side and its target.
    pub fn split(&mut self, actor: Side) -> (&Combatant, &mut Combatant) {
        match actor {
            Side::Player => (&self.player, &mut self.opponent),
            Side::Opponent => (&self.opponent, &mut self.player),
        }
    }
}

/// Narration helpers. The player is addressed in the second person.
pub(crate) fn subject(side: Side, combatant: &Combatant) -> String {
    match side {
        Side::Player => "You".to_string(),
        Side::Opponent => combatant.name.clone(),
    }
}

pub(crate) fn object(side: Side, combatant: &Combatant) -> String {
    match side {
        Side::Player => "you".to_string(),
        Side::Opponent => combatant.name.clone(),
    }
}

pub(crate) fn possessive(side: Side, combatant: &Combatant) -> String {
    match side {
        Side::Player => "Your".to_string(),
        Side::Opponent => format!("{}'s", combatant.name),
    }
}

/// Third-person verb form for NPC subjects.
pub(crate) fn verb(side: Side, base: &str) -> String {
    match side {
        Side::Player => base.to_string(),
        Side::Opponent if ["s", "sh", "ch", "x"].iter().any(|end| base.ends_with(end)) => {
            format!("{base}es")
        }
        Side::Opponent => format!("{base}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_agree_with_subject() {
        assert_eq!(verb(Side::Player, "punch"), "punch");
        assert_eq!(verb(Side::Opponent, "punch"), "punches");
        assert_eq!(verb(Side::Opponent, "grapple"), "grapples");
        assert_eq!(verb(Side::Opponent, "reload"), "reloads");
    }
}
