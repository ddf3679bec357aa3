use super::{Weapon, Wound, current_strength};
use crate::error::WeaponDataError;
use crate::model::CharacterSnapshot;

/// Character attributes relevant to combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub speed: u32,
    pub gun_accuracy: u32,
    pub throwing_accuracy: u32,
    /// Last computed current strength, kept in step with the wound list.
    pub strength: u32,
    pub base_strength: u32,
    pub bravery: u32,
    pub experience: u32,
}

impl Attributes {
    pub const DEFAULT_SCORE: u32 = 50;
    pub const DEFAULT_STRENGTH: u32 = 12;

    /// Average attributes with the given base strength.
    pub fn with_strength(base_strength: u32) -> Self {
        Self {
            strength: base_strength,
            base_strength,
            ..Self::default()
        }
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            speed: Self::DEFAULT_SCORE,
            gun_accuracy: Self::DEFAULT_SCORE,
            throwing_accuracy: Self::DEFAULT_SCORE,
            strength: Self::DEFAULT_STRENGTH,
            base_strength: Self::DEFAULT_STRENGTH,
            bravery: Self::DEFAULT_SCORE,
            experience: 0,
        }
    }
}

/// A participant in one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub is_npc: bool,
    pub attributes: Attributes,
    pub wounds: Vec<Wound>,
    pub is_unconscious: bool,
    pub weapon: Option<Weapon>,
}

impl Combatant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, attributes: Attributes) -> Self {
        let mut combatant = Self {
            id: id.into(),
            name: name.into(),
            is_npc: false,
            attributes,
            wounds: Vec::new(),
            is_unconscious: false,
            weapon: None,
        };
        combatant.sync_strength();
        combatant
    }

    #[must_use]
    pub fn npc(mut self) -> Self {
        self.is_npc = true;
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    #[must_use]
    pub fn with_wounds(mut self, wounds: Vec<Wound>) -> Self {
        self.wounds = wounds;
        self.sync_strength();
        self
    }

    /// Build a combatant from a character snapshot.
    ///
    /// Unusable weapon data leaves the combatant unarmed and is returned as a
    /// diagnostic alongside it.
    pub fn from_snapshot(snapshot: &CharacterSnapshot) -> (Self, Option<WeaponDataError>) {
        let (weapon, diagnostic) = match snapshot.equipped_weapon() {
            Ok(weapon) => (weapon, None),
            Err(error) => (None, Some(error)),
        };

        let mut combatant = Self {
            id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            is_npc: snapshot.is_npc,
            attributes: snapshot.attributes,
            wounds: snapshot.wounds.clone(),
            is_unconscious: snapshot.is_unconscious,
            weapon,
        };
        combatant.sync_strength();
        (combatant, diagnostic)
    }

    pub fn current_strength(&self) -> u32 {
        current_strength(self)
    }

    pub fn max_strength(&self) -> u32 {
        self.attributes.base_strength
    }

    pub fn is_knocked_out(&self) -> bool {
        self.is_unconscious || self.current_strength() == 0
    }

    /// Append a wound and return the resulting strength.
    ///
    /// Reaching 0 marks the combatant unconscious.
    pub fn receive_wound(&mut self, wound: Wound) -> u32 {
        self.wounds.push(wound);
        self.sync_strength()
    }

    fn sync_strength(&mut self) -> u32 {
        let strength = current_strength(self);
        self.attributes.strength = strength;
        if strength == 0 {
            self.is_unconscious = true;
        }
        strength
    }
}
