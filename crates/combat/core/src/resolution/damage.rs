//! Dice-notation damage and strength-based damage bonuses.

use crate::config::DamageParams;
use crate::dice::DiceRoller;
use crate::error::DamageSpecError;

/// Parsed dice notation: `count` dice with `sides` faces plus a flat bonus.
///
/// Accepted forms: `"1d6"`, `"d6"`, `"2d4+1"`, `"1d10-2"` and flat `"3"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageSpec {
    pub count: u32,
    pub sides: u32,
    pub bonus: i32,
}

impl DamageSpec {
    const MAX_DICE: u32 = 100;
    const MAX_SIDES: u32 = 1000;
    const MAX_BONUS: u32 = 1000;

    /// Used when a weapon's stored damage no longer parses.
    pub const FALLBACK: Self = Self {
        count: 1,
        sides: 6,
        bonus: 0,
    };

    pub fn parse(input: &str) -> Result<Self, DamageSpecError> {
        let text: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if text.is_empty() {
            return Err(DamageSpecError::Empty);
        }

        let (dice_part, bonus) = match text.find(['+', '-']) {
            Some(0) => return Err(DamageSpecError::UnexpectedToken(text)),
            Some(index) => {
                let (dice_part, modifier) = text.split_at(index);
                let magnitude = parse_bounded(&modifier[1..], Self::MAX_BONUS, &text)?;
                let sign = if modifier.starts_with('-') { -1 } else { 1 };
                (dice_part, sign * magnitude as i32)
            }
            None => (text.as_str(), 0),
        };

        match dice_part.split_once('d') {
            Some((count, sides)) => {
                let count = if count.is_empty() {
                    1
                } else {
                    parse_number(count)?
                };
                let sides = parse_number(sides)?;
                if count == 0 || sides == 0 {
                    return Err(DamageSpecError::ZeroDice(text));
                }
                if count > Self::MAX_DICE || sides > Self::MAX_SIDES {
                    return Err(DamageSpecError::UnexpectedToken(text));
                }
                Ok(Self {
                    count,
                    sides,
                    bonus,
                })
            }
            None => Ok(Self {
                count: 0,
                sides: 0,
                bonus: parse_bounded(dice_part, Self::MAX_BONUS, &text)? as i32 + bonus,
            }),
        }
    }

    /// Smallest possible result.
    pub fn min(&self) -> u32 {
        self.count.saturating_add_signed(self.bonus)
    }

    /// Largest possible result.
    pub fn max(&self) -> u32 {
        self.count
            .saturating_mul(self.sides)
            .saturating_add_signed(self.bonus)
    }

    /// Roll the dice, floored at 0.
    pub fn roll(&self, dice: &mut (impl DiceRoller + ?Sized)) -> u32 {
        let total = (0..self.count)
            .map(|_| dice.roll_die(self.sides))
            .fold(0u32, u32::saturating_add);
        total.saturating_add_signed(self.bonus)
    }
}

impl core::fmt::Display for DamageSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.count == 0 {
            return write!(f, "{}", self.bonus);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

impl core::str::FromStr for DamageSpec {
    type Err = DamageSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_number(text: &str) -> Result<u32, DamageSpecError> {
    text.parse()
        .map_err(|_| DamageSpecError::InvalidNumber(text.to_string()))
}

fn parse_bounded(text: &str, limit: u32, whole: &str) -> Result<u32, DamageSpecError> {
    let value = parse_number(text)?;
    if value > limit {
        return Err(DamageSpecError::UnexpectedToken(whole.to_string()));
    }
    Ok(value)
}

/// Evaluate a dice-notation damage string to a number.
pub fn parse_weapon_damage(
    spec: &str,
    dice: &mut (impl DiceRoller + ?Sized),
) -> Result<u32, DamageSpecError> {
    DamageSpec::parse(spec).map(|spec| spec.roll(dice))
}

/// Extra brawling damage for strength above the threshold.
pub fn strength_bonus(strength: u32, params: &DamageParams) -> u32 {
    strength.saturating_sub(params.strength_bonus_threshold) / params.strength_bonus_step.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn parses_common_forms() {
        assert_eq!(
            DamageSpec::parse("1d6"),
            Ok(DamageSpec {
                count: 1,
                sides: 6,
                bonus: 0
            })
        );
        assert_eq!(
            DamageSpec::parse(" 2D4 + 1 "),
            Ok(DamageSpec {
                count: 2,
                sides: 4,
                bonus: 1
            })
        );
        assert_eq!(DamageSpec::parse("d10-2").map(|s| s.bonus), Ok(-2));
        assert_eq!(DamageSpec::parse("3").map(|s| s.max()), Ok(3));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(DamageSpec::parse(""), Err(DamageSpecError::Empty));
        assert!(matches!(
            DamageSpec::parse("0d6"),
            Err(DamageSpecError::ZeroDice(_))
        ));
        assert!(matches!(
            DamageSpec::parse("1d6+x"),
            Err(DamageSpecError::InvalidNumber(_))
        ));
        assert!(matches!(
            DamageSpec::parse("-1"),
            Err(DamageSpecError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn rejects_oversized_dice_and_bonuses() {
        for text in ["1d2147483647", "101d6", "1d6+5000000000", "1d6+2000", "99999"] {
            assert!(DamageSpec::parse(text).is_err(), "{text} should not parse");
        }
        assert_eq!(DamageSpec::parse("1d1000").map(|s| s.max()), Ok(1000));
    }

    #[test]
    fn hand_built_specs_saturate() {
        let spec = DamageSpec {
            count: 2,
            sides: u32::MAX,
            bonus: i32::MAX,
        };
        assert_eq!(spec.max(), u32::MAX);
        let mut dice = ScriptedDice::new([u32::MAX, u32::MAX]);
        assert_eq!(spec.roll(&mut dice), u32::MAX);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for text in ["1d6", "2d4+1", "1d10-2", "5"] {
            let spec = DamageSpec::parse(text).unwrap();
            assert_eq!(spec.to_string(), text);
        }
    }

    #[test]
    fn rolled_damage_uses_each_die() {
        let mut dice = ScriptedDice::new([3, 4]);
        assert_eq!(parse_weapon_damage("2d6+1", &mut dice), Ok(8));
    }

    #[test]
    fn negative_bonus_floors_at_zero() {
        let mut dice = ScriptedDice::new([1]);
        assert_eq!(parse_weapon_damage("1d4-3", &mut dice), Ok(0));
    }

    #[test]
    fn strength_bonus_steps() {
        let params = DamageParams::default();
        assert_eq!(strength_bonus(12, &params), 0);
        assert_eq!(strength_bonus(15, &params), 1);
        assert_eq!(strength_bonus(18, &params), 2);
        assert_eq!(strength_bonus(3, &params), 0);
    }
}
