/// How bad a wound is.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WoundSeverity {
    Light,
    Serious,
    Mortal,
}

impl WoundSeverity {
    /// Classify a wound by its damage relative to the victim's base strength.
    ///
    /// Half or more of base strength is mortal, a quarter or more is serious.
    /// Critical hits are never lighter than serious.
    pub fn classify(damage: u32, base_strength: u32, critical: bool) -> Self {
        let base = base_strength.max(1);
        let severity = if damage.saturating_mul(2) >= base {
            Self::Mortal
        } else if damage.saturating_mul(4) >= base {
            Self::Serious
        } else {
            Self::Light
        };

        if critical {
            severity.max(Self::Serious)
        } else {
            severity
        }
    }
}

/// Body part struck by a blow or bullet.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(ascii_case_insensitive)]
pub enum BodyLocation {
    #[strum(serialize = "right leg")]
    RightLeg,
    #[strum(serialize = "left leg")]
    LeftLeg,
    #[strum(serialize = "abdomen")]
    Abdomen,
    #[strum(serialize = "chest")]
    Chest,
    #[strum(serialize = "right arm")]
    RightArm,
    #[strum(serialize = "left arm")]
    LeftArm,
    #[strum(serialize = "head")]
    Head,
}

impl BodyLocation {
    /// Upper bound (inclusive) of each location's band on the d100.
    const TABLE: [(u32, BodyLocation); 7] = [
        (12, Self::RightLeg),
        (24, Self::LeftLeg),
        (40, Self::Abdomen),
        (65, Self::Chest),
        (75, Self::RightArm),
        (85, Self::LeftArm),
        (100, Self::Head),
    ];

    /// Location for a d100 roll. Out-of-range rolls clamp to the table ends.
    pub fn from_d100(roll: u32) -> Self {
        let roll = roll.clamp(1, 100);
        Self::TABLE
            .iter()
            .find(|(upper, _)| roll <= *upper)
            .map(|(_, location)| *location)
            .unwrap_or(Self::Head)
    }
}

/// Persistent strength-reducing injury.
///
/// Wounds are append-only for the duration of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wound {
    pub location: BodyLocation,
    pub severity: WoundSeverity,
    pub strength_reduction: u32,
    /// Round in which the wound was received.
    pub turn_received: u32,
}

impl Wound {
    pub fn new(
        location: BodyLocation,
        severity: WoundSeverity,
        strength_reduction: u32,
        turn_received: u32,
    ) -> Self {
        Self {
            location,
            severity,
            strength_reduction,
            turn_received,
        }
    }

    /// Build the wound a hit of `damage` leaves on a victim.
    pub fn from_hit(
        location: BodyLocation,
        damage: u32,
        victim_base_strength: u32,
        critical: bool,
        turn_received: u32,
    ) -> Self {
        Self::new(
            location,
            WoundSeverity::classify(damage, victim_base_strength, critical),
            damage,
            turn_received,
        )
    }
}
