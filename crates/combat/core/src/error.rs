//! Error infrastructure for combat-core.
//!
//! Every error in this crate is recovered locally: a rejected player action
//! leaves the session untouched, and bad character data degrades to an
//! unarmed (or default-armed) combatant. [`CombatFault`] gives callers a
//! uniform way to classify and log them.

use crate::model::Side;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request may succeed later (e.g. after the opponent acts).
    Recoverable,
    /// Invalid input; retrying unchanged will fail again.
    Validation,
    /// Inconsistent data handed to the engine.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
pub trait CombatFault: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Rejections of a requested combat action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("an action is already being processed")]
    ActionInProgress,

    #[error("combat has already ended")]
    CombatEnded,

    #[error("combat has not ended yet")]
    NotEnded,

    #[error("no combat type has been selected")]
    CombatTypeNotSelected,

    #[error("combat type is already selected and cannot be switched")]
    CombatTypeAlreadySelected,

    #[error("{action} is not available in {mode} combat")]
    ActionNotAvailable {
        action: &'static str,
        mode: &'static str,
    },

    #[error("{side} weapon has malfunctioned; reload to clear it")]
    WeaponMalfunctioned { side: Side },

    #[error("{side} weapon is out of ammunition")]
    OutOfAmmunition { side: Side },

    #[error("{side} weapon does not need reloading")]
    ReloadNotNeeded { side: Side },

    #[error("{side} has no weapon")]
    NoWeapon { side: Side },

    #[error("range {requested} is outside {min}..={max}")]
    RangeOutOfBounds { requested: u32, min: u32, max: u32 },
}

impl CombatFault for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActionInProgress | Self::WeaponMalfunctioned { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::OutOfAmmunition { .. } => ErrorSeverity::Recoverable,
            Self::NoWeapon { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActionInProgress => "action_in_progress",
            Self::CombatEnded => "combat_ended",
            Self::NotEnded => "not_ended",
            Self::CombatTypeNotSelected => "combat_type_not_selected",
            Self::CombatTypeAlreadySelected => "combat_type_already_selected",
            Self::ActionNotAvailable { .. } => "action_not_available",
            Self::WeaponMalfunctioned { .. } => "weapon_malfunctioned",
            Self::OutOfAmmunition { .. } => "out_of_ammunition",
            Self::ReloadNotNeeded { .. } => "reload_not_needed",
            Self::NoWeapon { .. } => "no_weapon",
            Self::RangeOutOfBounds { .. } => "range_out_of_bounds",
        }
    }
}

/// Dice-notation parse failures (`"2d6+1"` style strings).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DamageSpecError {
    #[error("damage spec is empty")]
    Empty,

    #[error("invalid number `{0}` in damage spec")]
    InvalidNumber(String),

    #[error("damage spec `{0}` has zero dice or zero sides")]
    ZeroDice(String),

    #[error("unexpected `{0}` in damage spec")]
    UnexpectedToken(String),
}

impl CombatFault for DamageSpecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "damage_spec_empty",
            Self::InvalidNumber(_) => "damage_spec_invalid_number",
            Self::ZeroDice(_) => "damage_spec_zero_dice",
            Self::UnexpectedToken(_) => "damage_spec_unexpected_token",
        }
    }
}

/// Incomplete or unusable weapon data on an inventory item.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WeaponDataError {
    #[error("item `{item}` has no weapon modifiers")]
    NotAWeapon { item: String },

    #[error("weapon `{item}` is missing `{field}`")]
    MissingField { item: String, field: &'static str },

    #[error("weapon `{item}` has unusable damage: {source}")]
    BadDamage {
        item: String,
        #[source]
        source: DamageSpecError,
    },

    #[error("equipped weapon `{item}` is not in the inventory")]
    NotInInventory { item: String },
}

impl CombatFault for WeaponDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAWeapon { .. } => "weapon_not_a_weapon",
            Self::MissingField { .. } => "weapon_missing_field",
            Self::BadDamage { .. } => "weapon_bad_damage",
            Self::NotInInventory { .. } => "weapon_not_in_inventory",
        }
    }
}

/// A prior combat state that cannot be resumed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResumeError {
    #[error("round {round} is not a valid round")]
    InvalidRound { round: u32 },

    #[error("range {range} is outside {min}..={max}")]
    RangeOutOfBounds { range: u32, min: u32, max: u32 },

    #[error("{side} weapon holds {ammunition} rounds but carries at most {capacity}")]
    AmmunitionOverCapacity {
        side: Side,
        ammunition: u32,
        capacity: u32,
    },

    #[error("{side} aim bonus {aim_bonus} is outside 0..={max}")]
    AimBonusOutOfBounds { side: Side, aim_bonus: i32, max: i32 },
}

impl CombatFault for ResumeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRound { .. } => "resume_invalid_round",
            Self::RangeOutOfBounds { .. } => "resume_range_out_of_bounds",
            Self::AmmunitionOverCapacity { .. } => "resume_ammunition_over_capacity",
            Self::AimBonusOutOfBounds { .. } => "resume_aim_bonus_out_of_bounds",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_rejections_are_recoverable() {
        assert!(CombatError::ActionInProgress.severity().is_recoverable());
        assert!(
            CombatError::WeaponMalfunctioned { side: Side::Player }
                .severity()
                .is_recoverable()
        );
        assert!(!CombatError::CombatEnded.severity().is_recoverable());
    }

    #[test]
    fn messages_name_the_side() {
        let err = CombatError::OutOfAmmunition {
            side: Side::Opponent,
        };
        assert_eq!(err.to_string(), "opponent weapon is out of ammunition");
        assert_eq!(err.error_code(), "out_of_ammunition");
    }
}
