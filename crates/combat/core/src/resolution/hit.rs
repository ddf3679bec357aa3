//! Hit chance calculations.

use crate::config::{CombatTables, HitChanceParams};
use crate::model::{Combatant, current_strength};

/// Which attribute drives an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackStyle {
    /// Fists: strength and speed.
    Brawling,
    /// Guns: gun accuracy and experience.
    Firearm,
    /// Knives, axes: throwing accuracy and experience.
    Thrown,
}

/// Unclamped chance before situational modifiers.
///
/// ```text
/// brawling = base + 2 * (strength - 10) + (speed - 50) / 5
/// firearm  = base + (gun_accuracy - 50) / 2 + experience / 10
/// thrown   = base + (throwing_accuracy - 50) / 2 + experience / 10
/// ```
fn raw_hit_chance(attacker: &Combatant, style: AttackStyle, params: &HitChanceParams) -> i64 {
    let attrs = &attacker.attributes;
    let base = i64::from(params.base);
    match style {
        AttackStyle::Brawling => {
            let strength = i64::from(current_strength(attacker));
            base + 2 * (strength - 10) + (i64::from(attrs.speed) - 50) / 5
        }
        AttackStyle::Firearm => {
            base + (i64::from(attrs.gun_accuracy) - 50) / 2 + i64::from(attrs.experience) / 10
        }
        AttackStyle::Thrown => {
            base + (i64::from(attrs.throwing_accuracy) - 50) / 2
                + i64::from(attrs.experience) / 10
        }
    }
}

// Snapshot attributes are unbounded; widen before clamping.
fn clamp_chance(chance: i64, params: &HitChanceParams) -> u32 {
    let (min, max) = (params.min.min(params.max), params.max);
    chance.clamp(i64::from(min), i64::from(max)) as u32
}

/// Percent chance to hit for an attacker, clamped to `[min, max]`.
pub fn calculate_hit_chance(attacker: &Combatant, style: AttackStyle, tables: &CombatTables) -> u32 {
    let params = &tables.hit_chance;
    clamp_chance(raw_hit_chance(attacker, style, params), params)
}

/// Hit chance with a situational modifier applied before clamping.
pub fn chance_with_modifier(
    attacker: &Combatant,
    style: AttackStyle,
    modifier: i32,
    tables: &CombatTables,
) -> u32 {
    let params = &tables.hit_chance;
    clamp_chance(
        raw_hit_chance(attacker, style, params) + i64::from(modifier),
        params,
    )
}

/// Whether a d100 roll hits against `chance`.
pub fn check_hit(roll: u32, chance: u32) -> bool {
    roll <= chance
}
