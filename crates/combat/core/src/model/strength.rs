use super::Combatant;

/// Current strength: base strength minus every wound's reduction, floored at 0.
///
/// A result of 0 is the knockout signal; acting on it is the caller's job.
pub fn current_strength(combatant: &Combatant) -> u32 {
    let lost: u32 = combatant
        .wounds
        .iter()
        .map(|wound| wound.strength_reduction)
        .fold(0u32, u32::saturating_add);
    combatant.attributes.base_strength.saturating_sub(lost)
}

pub fn is_knocked_out(combatant: &Combatant) -> bool {
    current_strength(combatant) == 0
}

/// Current strength as a percentage of base strength (0 when base is 0).
pub fn strength_ratio_percent(combatant: &Combatant) -> u32 {
    let max = combatant.attributes.base_strength;
    if max == 0 {
        return 0;
    }
    (u64::from(current_strength(combatant)) * 100 / u64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attributes, BodyLocation, Wound, WoundSeverity};

    fn fighter(base: u32) -> Combatant {
        Combatant::new("t", "Tester", Attributes::with_strength(base))
    }

    #[test]
    fn unwounded_is_base() {
        assert_eq!(current_strength(&fighter(15)), 15);
    }

    #[test]
    fn wounds_subtract_and_floor_at_zero() {
        let mut c = fighter(8);
        c.wounds
            .push(Wound::new(BodyLocation::Chest, WoundSeverity::Serious, 3, 1));
        assert_eq!(current_strength(&c), 5);
        c.wounds
            .push(Wound::new(BodyLocation::Head, WoundSeverity::Mortal, 10, 2));
        assert_eq!(current_strength(&c), 0);
        assert!(is_knocked_out(&c));
    }

    #[test]
    fn ratio_handles_zero_base() {
        assert_eq!(strength_ratio_percent(&fighter(0)), 0);
        assert_eq!(strength_ratio_percent(&fighter(20)), 100);
    }
}
