use crate::error::WeaponDataError;
use crate::resolution::DamageSpec;

/// Fully specified weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    /// Dice notation, validated on construction (e.g. `"1d6"`, `"2d4+1"`).
    pub damage: String,
    /// Effective range; the accuracy curve is measured against it.
    pub range: u32,
    /// Flat accuracy modifier.
    pub accuracy: i32,
    /// Percent chance (0..=100) that a shot goes off without a malfunction.
    pub reliability: u32,
    /// Magazine size. `None` means ammunition is not tracked.
    pub ammunition: Option<u32>,
    /// Thrown weapons use throwing accuracy instead of gun accuracy.
    pub thrown: bool,
}

impl Weapon {
    pub const DEFAULT_RELIABILITY: u32 = 95;

    /// Weapon handed to an NPC that enters weapon combat unarmed.
    pub fn colt_revolver() -> Self {
        Self {
            name: "Colt Revolver".into(),
            damage: "1d6".into(),
            range: 20,
            accuracy: 0,
            reliability: Self::DEFAULT_RELIABILITY,
            ammunition: Some(6),
            thrown: false,
        }
    }

    /// Build a weapon from inventory modifiers, requiring damage, range and
    /// accuracy.
    pub fn from_modifiers(
        name: impl Into<String>,
        modifiers: &WeaponModifiers,
    ) -> Result<Self, WeaponDataError> {
        let name = name.into();

        let damage = modifiers
            .damage
            .clone()
            .ok_or_else(|| WeaponDataError::MissingField {
                item: name.clone(),
                field: "damage",
            })?;
        DamageSpec::parse(&damage).map_err(|source| WeaponDataError::BadDamage {
            item: name.clone(),
            source,
        })?;

        let range = modifiers.range.ok_or_else(|| WeaponDataError::MissingField {
            item: name.clone(),
            field: "range",
        })?;
        let accuracy = modifiers
            .accuracy
            .ok_or_else(|| WeaponDataError::MissingField {
                item: name.clone(),
                field: "accuracy",
            })?;

        Ok(Self {
            name,
            damage,
            range: range.max(1),
            accuracy,
            reliability: modifiers
                .reliability
                .unwrap_or(Self::DEFAULT_RELIABILITY)
                .min(100),
            ammunition: modifiers.ammunition,
            thrown: modifiers.thrown.unwrap_or(false),
        })
    }

    pub fn tracks_ammunition(&self) -> bool {
        self.ammunition.is_some()
    }
}

/// Raw weapon modifiers as they appear on an inventory item.
///
/// Every field is optional because snapshots come from outside the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponModifiers {
    pub damage: Option<String>,
    pub range: Option<u32>,
    pub accuracy: Option<i32>,
    pub reliability: Option<u32>,
    pub ammunition: Option<u32>,
    pub thrown: Option<bool>,
}
