use super::{Attributes, Weapon, WeaponModifiers, Wound};
use crate::error::WeaponDataError;

/// Inventory entry in a character snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSnapshot {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<WeaponModifiers>,
}

impl ItemSnapshot {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weapon: None,
        }
    }

    pub fn weapon(name: impl Into<String>, modifiers: WeaponModifiers) -> Self {
        Self {
            name: name.into(),
            weapon: Some(modifiers),
        }
    }
}

/// Character record handed to the engine when an encounter starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_npc: bool,
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wounds: Vec<Wound>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_unconscious: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<ItemSnapshot>,
    /// Name of the inventory item currently wielded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipped_weapon: Option<String>,
}

impl CharacterSnapshot {
    pub fn new(id: impl Into<String>, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_npc: false,
            attributes,
            wounds: Vec::new(),
            is_unconscious: false,
            inventory: Vec::new(),
            equipped_weapon: None,
        }
    }

    /// Resolve the equipped weapon against the inventory.
    ///
    /// `Ok(None)` means nothing is equipped.
    pub fn equipped_weapon(&self) -> Result<Option<Weapon>, WeaponDataError> {
        let Some(equipped) = &self.equipped_weapon else {
            return Ok(None);
        };

        let item = self
            .inventory
            .iter()
            .find(|item| &item.name == equipped)
            .ok_or_else(|| WeaponDataError::NotInInventory {
                item: equipped.clone(),
            })?;

        let modifiers = item
            .weapon
            .as_ref()
            .ok_or_else(|| WeaponDataError::NotAWeapon {
                item: item.name.clone(),
            })?;

        Weapon::from_modifiers(item.name.clone(), modifiers).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_equipped_is_not_an_error() {
        let snapshot = CharacterSnapshot::new("p", "Player", Attributes::default());
        assert_eq!(snapshot.equipped_weapon(), Ok(None));
    }

    #[test]
    fn equipped_item_must_be_in_inventory() {
        let snapshot = CharacterSnapshot {
            equipped_weapon: Some("Derringer".into()),
            ..CharacterSnapshot::new("p", "Player", Attributes::default())
        };
        assert!(matches!(
            snapshot.equipped_weapon(),
            Err(WeaponDataError::NotInInventory { .. })
        ));
    }

    #[test]
    fn plain_items_are_not_weapons() {
        let snapshot = CharacterSnapshot {
            inventory: vec![ItemSnapshot::plain("Canteen")],
            equipped_weapon: Some("Canteen".into()),
            ..CharacterSnapshot::new("p", "Player", Attributes::default())
        };
        assert!(matches!(
            snapshot.equipped_weapon(),
            Err(WeaponDataError::NotAWeapon { .. })
        ));
    }
}
