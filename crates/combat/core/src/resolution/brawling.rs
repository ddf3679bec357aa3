//! Unarmed blow resolution.

use crate::config::CombatTables;
use crate::dice::DiceRoller;
use crate::model::{BodyLocation, Combatant, current_strength};

use super::damage::strength_bonus;
use super::hit::{AttackStyle, chance_with_modifier};

/// Unarmed moves.
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
pub enum BrawlingAction {
    /// Straight damage.
    Punch,
    /// Half damage, but a hold that helps the next action.
    Grapple,
}

/// Categorical outcome of one blow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrawlingResult {
    #[strum(serialize = "Critical Hit")]
    CriticalHit,
    #[strum(serialize = "Heavy Hit")]
    HeavyHit,
    #[strum(serialize = "Light Hit")]
    LightHit,
    #[strum(serialize = "Miss")]
    Miss,
}

impl BrawlingResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::CriticalHit | Self::HeavyHit | Self::LightHit)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::CriticalHit)
    }
}

/// Everything a single blow produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrawlingOutcome {
    pub action: BrawlingAction,
    pub roll: u32,
    pub result: BrawlingResult,
    pub damage: u32,
    /// Where the blow landed; `None` on a miss.
    pub location: Option<BodyLocation>,
    /// Modifier to the attacker's next action.
    pub next_round_modifier: i32,
}

impl BrawlingOutcome {
    /// Outcome with explicit values, bypassing the dice.
    pub fn forced(
        action: BrawlingAction,
        result: BrawlingResult,
        damage: u32,
        location: Option<BodyLocation>,
    ) -> Self {
        Self {
            action,
            roll: 0,
            result,
            damage: if result.is_hit() { damage } else { 0 },
            location: if result.is_hit() { location } else { None },
            next_round_modifier: 0,
        }
    }
}

/// Categorize an attack roll against a chance.
///
/// Both critical bands, at the low and the high extreme of the d100, are
/// checked first, so they apply at any chance.
pub fn categorize(roll: u32, chance: u32, tables: &CombatTables) -> BrawlingResult {
    if tables.hit_chance.is_critical_roll(roll) {
        BrawlingResult::CriticalHit
    } else if roll <= chance / 2 {
        BrawlingResult::HeavyHit
    } else if roll <= chance {
        BrawlingResult::LightHit
    } else {
        BrawlingResult::Miss
    }
}

/// Resolve one blow from already-rolled dice.
///
/// * `modifier` - attacker's carried-over situational modifier
/// * `roll` - d100 attack roll
/// * `location_roll` - d100 for the hit location (ignored on a miss)
/// * `damage_die` - d4 for heavy and critical hits (ignored otherwise)
///
/// Damage: light 1, heavy `d4 + strength bonus`, critical
/// `(d4 + 2) * crit multiplier + strength bonus`. A grapple halves damage
/// (minimum 1 on a hit) and earns the grappler a hold bonus.
pub fn resolve_brawling_round(
    attacker: &Combatant,
    action: BrawlingAction,
    modifier: i32,
    roll: u32,
    location_roll: u32,
    damage_die: u32,
    tables: &CombatTables,
) -> BrawlingOutcome {
    let params = &tables.damage;
    let chance = chance_with_modifier(attacker, AttackStyle::Brawling, modifier, tables);
    let result = categorize(roll, chance, tables);
    let bonus = strength_bonus(current_strength(attacker), params);

    let base_damage = match result {
        BrawlingResult::CriticalHit => (damage_die + 2)
            .saturating_mul(params.crit_multiplier)
            .saturating_add(bonus),
        BrawlingResult::HeavyHit => damage_die.saturating_add(bonus),
        BrawlingResult::LightHit => 1,
        BrawlingResult::Miss => 0,
    };

    let damage = match action {
        BrawlingAction::Grapple if result.is_hit() => (base_damage / 2).max(1),
        _ => base_damage,
    };

    let next_round_modifier = match action {
        BrawlingAction::Grapple if result.is_hit() => params.grapple_hold_bonus,
        _ => 0,
    };

    BrawlingOutcome {
        action,
        roll,
        result,
        damage,
        location: result
            .is_hit()
            .then(|| BodyLocation::from_d100(location_roll)),
        next_round_modifier,
    }
}

/// Roll and resolve one blow.
///
/// Draw order: d100 attack; on a hit, d100 location; on a heavy or critical
/// hit, d4 damage.
pub fn roll_brawling_round(
    attacker: &Combatant,
    action: BrawlingAction,
    modifier: i32,
    dice: &mut (impl DiceRoller + ?Sized),
    tables: &CombatTables,
) -> BrawlingOutcome {
    let roll = dice.roll_d100();
    let chance = chance_with_modifier(attacker, AttackStyle::Brawling, modifier, tables);
    let result = categorize(roll, chance, tables);

    let location_roll = if result.is_hit() { dice.roll_d100() } else { 0 };
    let damage_die = match result {
        BrawlingResult::CriticalHit | BrawlingResult::HeavyHit => dice.roll_die(4),
        _ => 0,
    };

    resolve_brawling_round(
        attacker,
        action,
        modifier,
        roll,
        location_roll,
        damage_die,
        tables,
    )
}
