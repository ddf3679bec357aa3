//! Firearm and thrown-weapon resolution: range curve, malfunctions, shots.

use crate::config::{CombatTables, RangeCurve};
use crate::dice::DiceRoller;
use crate::error::DamageSpecError;
use crate::model::{BodyLocation, Combatant, Weapon};

use super::damage::DamageSpec;
use super::hit::{AttackStyle, chance_with_modifier};

/// Accuracy adjustment for firing at `range` with a weapon whose effective
/// range is `effective_range`.
///
/// ```text
/// range <= R/4  point blank
/// range <= R/2  short
/// range <= R    medium
/// range <= 2R   long
/// beyond        extreme
/// ```
pub fn range_modifier(effective_range: u32, range: u32, curve: &RangeCurve) -> i32 {
    let effective = effective_range.max(1);
    if range.saturating_mul(4) <= effective {
        curve.point_blank
    } else if range.saturating_mul(2) <= effective {
        curve.short
    } else if range <= effective {
        curve.medium
    } else if range <= effective.saturating_mul(2) {
        curve.long
    } else {
        curve.extreme
    }
}

/// Combined accuracy modifier for a shot: weapon accuracy, range band and
/// accumulated aim.
pub fn calculate_weapon_modifier(
    weapon: &Weapon,
    range: u32,
    aim_bonus: i32,
    tables: &CombatTables,
) -> i32 {
    weapon
        .accuracy
        .saturating_add(range_modifier(weapon.range, range, &tables.range))
        .saturating_add(aim_bonus)
}

/// Whether a d100 reliability roll jams the weapon.
pub fn malfunctions_on(weapon: &Weapon, roll: u32) -> bool {
    roll > weapon.reliability
}

/// Roll for a malfunction against the weapon's reliability.
pub fn roll_for_malfunction(weapon: &Weapon, dice: &mut (impl DiceRoller + ?Sized)) -> bool {
    malfunctions_on(weapon, dice.roll_d100())
}

/// Categorical outcome of a shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    #[strum(serialize = "Critical Hit")]
    CriticalHit,
    #[strum(serialize = "Hit")]
    Hit,
    #[strum(serialize = "Miss")]
    Miss,
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }
}

/// Everything a single shot produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotOutcome {
    pub roll: u32,
    pub chance: u32,
    /// Weapon modifier the chance was computed with.
    pub modifier: i32,
    pub result: ShotResult,
    pub damage: u32,
    pub location: Option<BodyLocation>,
}

fn style_for(weapon: &Weapon) -> AttackStyle {
    if weapon.thrown {
        AttackStyle::Thrown
    } else {
        AttackStyle::Firearm
    }
}

/// Resolve a shot from already-rolled dice.
///
/// `weapon_damage` is the weapon's rolled damage; critical hits multiply it.
#[allow(clippy::too_many_arguments)]
pub fn resolve_shot(
    attacker: &Combatant,
    weapon: &Weapon,
    range: u32,
    aim_bonus: i32,
    roll: u32,
    location_roll: u32,
    weapon_damage: u32,
    tables: &CombatTables,
) -> ShotOutcome {
    let modifier = calculate_weapon_modifier(weapon, range, aim_bonus, tables);
    let chance = chance_with_modifier(attacker, style_for(weapon), modifier, tables);

    let result = if roll <= tables.hit_chance.critical_max {
        ShotResult::CriticalHit
    } else if roll <= chance {
        ShotResult::Hit
    } else {
        ShotResult::Miss
    };

    let damage = match result {
        ShotResult::CriticalHit => weapon_damage.saturating_mul(tables.damage.crit_multiplier),
        ShotResult::Hit => weapon_damage,
        ShotResult::Miss => 0,
    };

    ShotOutcome {
        roll,
        chance,
        modifier,
        result,
        damage,
        location: result
            .is_hit()
            .then(|| BodyLocation::from_d100(location_roll)),
    }
}

/// Roll and resolve a shot.
///
/// Draw order: d100 attack; on a hit, d100 location then the weapon's damage
/// dice. Malfunction rolls are the caller's concern and happen before this.
pub fn roll_shot(
    attacker: &Combatant,
    weapon: &Weapon,
    range: u32,
    aim_bonus: i32,
    dice: &mut (impl DiceRoller + ?Sized),
    tables: &CombatTables,
) -> Result<ShotOutcome, DamageSpecError> {
    let spec = DamageSpec::parse(&weapon.damage)?;
    Ok(roll_shot_with(
        attacker, weapon, &spec, range, aim_bonus, dice, tables,
    ))
}

/// [`roll_shot`] with the weapon's damage already parsed.
pub fn roll_shot_with(
    attacker: &Combatant,
    weapon: &Weapon,
    damage: &DamageSpec,
    range: u32,
    aim_bonus: i32,
    dice: &mut (impl DiceRoller + ?Sized),
    tables: &CombatTables,
) -> ShotOutcome {
    let modifier = calculate_weapon_modifier(weapon, range, aim_bonus, tables);
    let chance = chance_with_modifier(attacker, style_for(weapon), modifier, tables);
    let roll = dice.roll_d100();

    let hit = roll <= tables.hit_chance.critical_max || roll <= chance;
    let (location_roll, weapon_damage) = if hit {
        let location_roll = dice.roll_d100();
        (location_roll, damage.roll(dice))
    } else {
        (0, 0)
    };

    resolve_shot(
        attacker,
        weapon,
        range,
        aim_bonus,
        roll,
        location_roll,
        weapon_damage,
        tables,
    )
}
