use crate::clock::Timestamp;
use crate::config::CombatConfig;
use crate::error::ResumeError;
use crate::log::LogBook;
use crate::round::{BrawlingAction, BrawlingState, WeaponAction, WeaponCombatState};

use super::CombatSummary;

/// The two ways an encounter can be fought.
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
pub enum CombatType {
    Brawling,
    Weapon,
}

/// Logical player action surface.
///
/// `Attack` is the generic action of the selected combat type: a punch when
/// brawling, a shot in weapon combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlayerAction {
    Attack,
    Punch,
    Grapple,
    Aim,
    Fire,
    Move(u32),
    Reload,
}

impl PlayerAction {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Punch => "punch",
            Self::Grapple => "grapple",
            Self::Aim => "aim",
            Self::Fire => "fire",
            Self::Move(_) => "move",
            Self::Reload => "reload",
        }
    }

    pub(crate) fn as_brawling(&self) -> Option<BrawlingAction> {
        match self {
            Self::Attack | Self::Punch => Some(BrawlingAction::Punch),
            Self::Grapple => Some(BrawlingAction::Grapple),
            _ => None,
        }
    }

    pub(crate) fn as_weapon(&self) -> Option<WeaponAction> {
        match *self {
            Self::Attack | Self::Fire => Some(WeaponAction::Fire),
            Self::Aim => Some(WeaponAction::Aim),
            Self::Move(target_range) => Some(WeaponAction::Move { target_range }),
            Self::Reload => Some(WeaponAction::Reload),
            Self::Punch | Self::Grapple => None,
        }
    }
}

/// Round-processor state of the selected combat type.
///
/// This is what `UPDATE_COMBAT_STATE` carries and what a session resumes from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum CombatState {
    Brawling(BrawlingState),
    Weapon(WeaponCombatState),
}

impl CombatState {
    pub fn combat_type(&self) -> CombatType {
        match self {
            Self::Brawling(_) => CombatType::Brawling,
            Self::Weapon(_) => CombatType::Weapon,
        }
    }

    pub fn round(&self) -> u32 {
        match self {
            Self::Brawling(state) => state.round,
            Self::Weapon(state) => state.round,
        }
    }

    /// Whether this state can be resumed under `config`.
    pub fn check_resumable(&self, config: &CombatConfig) -> Result<(), ResumeError> {
        match self {
            Self::Brawling(state) => state.check_resumable(),
            Self::Weapon(state) => state.check_resumable(config),
        }
    }

    pub fn round_log(&self) -> &LogBook {
        match self {
            Self::Brawling(state) => &state.round_log,
            Self::Weapon(state) => &state.round_log,
        }
    }
}

/// Orchestrator state: `selecting-type -> (brawling | weapon) -> ended`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatMode {
    SelectingType,
    Active(CombatState),
    Ended {
        state: CombatState,
        summary: CombatSummary,
    },
}

impl CombatMode {
    pub fn combat_type(&self) -> Option<CombatType> {
        self.state().map(CombatState::combat_type)
    }

    pub fn state(&self) -> Option<&CombatState> {
        match self {
            Self::SelectingType => None,
            Self::Active(state) | Self::Ended { state, .. } => Some(state),
        }
    }

    pub fn summary(&self) -> Option<&CombatSummary> {
        match self {
            Self::Ended { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended { .. })
    }
}

/// Turn state machine.
///
/// A player action is resolved synchronously and moves the session to
/// `OpponentPending`; the opponent's counter is resolved once the clock
/// reaches `due_at`, returning to `AwaitingPlayerAction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "phase", rename_all = "snake_case"))]
pub enum TurnPhase {
    AwaitingPlayerAction,
    OpponentPending { due_at: Timestamp },
    Ended,
}

impl TurnPhase {
    pub fn due_at(&self) -> Option<Timestamp> {
        match self {
            Self::OpponentPending { due_at } => Some(*due_at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_maps_to_the_mode_default() {
        assert_eq!(
            PlayerAction::Attack.as_brawling(),
            Some(BrawlingAction::Punch)
        );
        assert_eq!(PlayerAction::Attack.as_weapon(), Some(WeaponAction::Fire));
        assert_eq!(PlayerAction::Fire.as_brawling(), None);
        assert_eq!(PlayerAction::Grapple.as_weapon(), None);
        assert_eq!(
            PlayerAction::Move(20).as_weapon(),
            Some(WeaponAction::Move { target_range: 20 })
        );
    }

    #[test]
    fn combat_type_parses_case_insensitively() {
        assert_eq!("Weapon".parse::<CombatType>(), Ok(CombatType::Weapon));
        assert_eq!(CombatType::Brawling.to_string(), "brawling");
    }
}
