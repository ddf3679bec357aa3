//! Combatant data: attributes, wounds, weapons and the strength they imply.
//!
//! Combatants are created from a [`CharacterSnapshot`] when an encounter
//! starts and are only mutated by appending [`Wound`]s. The authoritative
//! character record lives outside the engine.

mod combatant;
mod snapshot;
mod strength;
mod weapon;
mod wound;

pub use combatant::{Attributes, Combatant};
pub use snapshot::{CharacterSnapshot, ItemSnapshot};
pub use strength::{current_strength, is_knocked_out, strength_ratio_percent};
pub use weapon::{Weapon, WeaponModifiers};
pub use wound::{BodyLocation, Wound, WoundSeverity};

/// One of the two participants in an encounter.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}
