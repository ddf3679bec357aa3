//! Deterministic combat resolution for the narrative client.
//!
//! `combat-core` owns the rules of a single encounter between the player and
//! one opponent. Brawling and weapon combat are resolved by pure functions in
//! [`resolution`], sequenced by the round processors in [`round`], and driven
//! by [`session::CombatSession`], which is the only type that talks to the
//! surrounding application through a [`session::Dispatcher`].
//!
//! Randomness and time are injected ([`dice::DiceRoller`], [`clock::Clock`]),
//! so every encounter can be replayed exactly in tests.
pub mod clock;
pub mod config;
pub mod dice;
pub mod error;
pub mod log;
pub mod model;
pub mod resolution;
pub mod round;
pub mod session;

pub use clock::{Clock, ManualClock, Timestamp};
pub use config::{CombatConfig, CombatTables};
pub use dice::{DiceRoller, PcgDice, ScriptedDice};
pub use error::{
    CombatError, CombatFault, DamageSpecError, ErrorSeverity, ResumeError, WeaponDataError,
};
pub use log::{CombatLogEntry, LogKind, merge_logs};
pub use model::{
    Attributes, BodyLocation, CharacterSnapshot, Combatant, ItemSnapshot, Side, Weapon,
    WeaponModifiers, Wound, WoundSeverity, current_strength,
};
pub use round::{
    BrawlingAction, BrawlingState, Fighters, HalfTurn, WeaponAction, WeaponActionKind,
    WeaponCombatState, WeaponSlot,
};
pub use session::{
    CombatMode, CombatSession, CombatSessionBuilder, CombatSnapshot, CombatState, CombatStats,
    CombatSummary, CombatType, Dispatcher, EndCallback, PlayerAction, RecordingDispatcher,
    StoreAction, TurnPhase,
};
