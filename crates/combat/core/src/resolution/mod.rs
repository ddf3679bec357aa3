//! Hit and damage resolution.
//!
//! Pure functions over combatants, weapons and already-rolled dice. Each
//! `resolve_*` function takes its rolls as arguments; the matching `roll_*`
//! wrapper draws them from a [`DiceRoller`](crate::dice::DiceRoller) in a
//! documented order and delegates.
//!
//! All rolls are d100 where lower is better: an attack hits when
//! `roll <= chance`.

pub mod brawling;
pub mod damage;
pub mod hit;
pub mod weapon;

pub use brawling::{
    BrawlingAction, BrawlingOutcome, BrawlingResult, categorize, resolve_brawling_round,
    roll_brawling_round,
};
pub use damage::{DamageSpec, parse_weapon_damage, strength_bonus};
pub use hit::{AttackStyle, calculate_hit_chance, chance_with_modifier, check_hit};
pub use weapon::{
    ShotOutcome, ShotResult, calculate_weapon_modifier, malfunctions_on, range_modifier,
    resolve_shot, roll_for_malfunction, roll_shot, roll_shot_with,
};
