//! Per-combatant status panel model.

use combat_core::model::strength_ratio_percent;
use combat_core::{BodyLocation, Combatant, Weapon, WeaponSlot, Wound, WoundSeverity};

/// Severity band of a strength indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrengthLevel {
    Normal,
    /// At or below half strength.
    Warning,
    /// At or below a quarter of strength.
    Critical,
}

impl StrengthLevel {
    pub const WARNING_PERCENT: u32 = 50;
    pub const CRITICAL_PERCENT: u32 = 25;

    pub fn from_percent(percent: u32) -> Self {
        if percent <= Self::CRITICAL_PERCENT {
            Self::Critical
        } else if percent <= Self::WARNING_PERCENT {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub fn from_ratio(current: u32, maximum: u32) -> Self {
        if maximum == 0 {
            return Self::Critical;
        }
        Self::from_percent(current.saturating_mul(100) / maximum)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WoundLine {
    pub location: BodyLocation,
    pub severity: WoundSeverity,
    pub strength_reduction: u32,
    pub turn_received: u32,
}

impl WoundLine {
    pub fn text(&self) -> String {
        format!(
            "{} wound to the {} (-{}, round {})",
            capitalize(self.severity.as_ref()),
            self.location,
            self.strength_reduction,
            self.turn_received
        )
    }
}

impl From<&Wound> for WoundLine {
    fn from(wound: &Wound) -> Self {
        Self {
            location: wound.location,
            severity: wound.severity,
            strength_reduction: wound.strength_reduction,
            turn_received: wound.turn_received,
        }
    }
}

/// What the weapon line of a status panel shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WeaponLabel {
    Equipped {
        name: String,
        /// `(current, maximum)` when ammunition is tracked.
        ammunition: Option<(u32, u32)>,
        jammed: bool,
    },
    /// An NPC without a weapon; it will be issued this one in weapon combat.
    DefaultFallback { name: String },
    Unarmed,
}

impl WeaponLabel {
    /// Label for a combatant, preferring the live weapon-combat slot.
    pub fn for_combatant(combatant: &Combatant, slot: Option<&WeaponSlot>) -> Self {
        if let Some(slot) = slot {
            return match &slot.weapon {
                Some(weapon) => Self::Equipped {
                    name: weapon.name.clone(),
                    ammunition: slot.ammunition.zip(slot.capacity()),
                    jammed: slot.is_jammed(),
                },
                None => Self::Unarmed,
            };
        }

        match &combatant.weapon {
            Some(weapon) => Self::Equipped {
                name: weapon.name.clone(),
                ammunition: weapon.ammunition.map(|max| (max, max)),
                jammed: false,
            },
            None if combatant.is_npc => Self::DefaultFallback {
                name: Weapon::colt_revolver().name,
            },
            None => Self::Unarmed,
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::Equipped {
                name,
                ammunition,
                jammed,
            } => {
                let mut text = name.clone();
                if let Some((current, max)) = ammunition {
                    text.push_str(&format!(" [{current}/{max}]"));
                }
                if *jammed {
                    text.push_str(" (jammed)");
                }
                text
            }
            Self::DefaultFallback { name } => format!("{name} (default)"),
            Self::Unarmed => "No weapon equipped".to_string(),
        }
    }
}

/// Status panel for one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatantStatus {
    pub name: String,
    pub is_player: bool,
    pub current_strength: u32,
    pub max_strength: u32,
    pub level: StrengthLevel,
    pub unconscious: bool,
    pub wounds: Vec<WoundLine>,
    pub weapon: WeaponLabel,
}

impl CombatantStatus {
    pub fn new(combatant: &Combatant, slot: Option<&WeaponSlot>) -> Self {
        let current_strength = combatant.current_strength();
        Self {
            name: combatant.name.clone(),
            is_player: !combatant.is_npc,
            current_strength,
            max_strength: combatant.max_strength(),
            level: StrengthLevel::from_percent(strength_ratio_percent(combatant)),
            unconscious: combatant.is_knocked_out(),
            wounds: combatant.wounds.iter().map(WoundLine::from).collect(),
            weapon: WeaponLabel::for_combatant(combatant, slot),
        }
    }

    /// Name line, marked when the combatant is out.
    pub fn title(&self) -> String {
        if self.unconscious {
            format!("{} (Unconscious)", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn strength_text(&self) -> String {
        format!("{}/{}", self.current_strength, self.max_strength)
    }

    /// Fill ratio for a gauge, in `0.0..=1.0`.
    pub fn strength_ratio(&self) -> f64 {
        if self.max_strength == 0 {
            return 0.0;
        }
        (f64::from(self.current_strength) / f64::from(self.max_strength)).clamp(0.0, 1.0)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
