//! Combat configuration constants and tunable balance tables.

/// Session-level tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Delay between the player's half-turn and the opponent's counter, in ms.
    pub opponent_delay_ms: u64,
    /// Smallest range the move slider accepts.
    pub min_range: u32,
    /// Largest range the move slider accepts.
    pub max_range: u32,
    /// Range at which weapon combat opens.
    pub starting_range: u32,
    /// Accuracy gained per aim action.
    pub aim_step: i32,
    /// Cap for the accumulated aim bonus.
    pub max_aim_bonus: i32,
    /// Balance tables consumed by the resolution functions.
    pub tables: CombatTables,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 1000;
    pub const DEFAULT_MIN_RANGE: u32 = 1;
    pub const DEFAULT_MAX_RANGE: u32 = 100;
    pub const DEFAULT_STARTING_RANGE: u32 = 10;
    pub const DEFAULT_AIM_STEP: i32 = 10;
    pub const DEFAULT_MAX_AIM_BONUS: i32 = 30;

    pub fn new() -> Self {
        Self {
            opponent_delay_ms: Self::DEFAULT_OPPONENT_DELAY_MS,
            min_range: Self::DEFAULT_MIN_RANGE,
            max_range: Self::DEFAULT_MAX_RANGE,
            starting_range: Self::DEFAULT_STARTING_RANGE,
            aim_step: Self::DEFAULT_AIM_STEP,
            max_aim_bonus: Self::DEFAULT_MAX_AIM_BONUS,
            tables: CombatTables::default(),
        }
    }

    #[must_use]
    pub fn with_opponent_delay_ms(mut self, delay_ms: u64) -> Self {
        self.opponent_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_starting_range(mut self, range: u32) -> Self {
        self.starting_range = range.clamp(self.min_range, self.max_range);
        self
    }

    #[must_use]
    pub fn with_tables(mut self, tables: CombatTables) -> Self {
        self.tables = tables;
        self
    }

    /// Whether `range` lies on the move slider.
    pub fn range_in_bounds(&self, range: u32) -> bool {
        (self.min_range..=self.max_range).contains(&range)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance parameters for hit and damage resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTables {
    pub hit_chance: HitChanceParams,
    pub damage: DamageParams,
    pub range: RangeCurve,
}

/// Hit-chance clamp and thresholds on the d100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitChanceParams {
    pub base: i32,
    pub min: u32,
    pub max: u32,
    /// Rolls at or below this value are critical hits.
    pub critical_max: u32,
    /// Rolls at or above this value are critical hits in brawling.
    pub high_critical_min: u32,
}

impl HitChanceParams {
    /// Whether a brawling roll lands in either critical band.
    pub fn is_critical_roll(&self, roll: u32) -> bool {
        roll <= self.critical_max || roll >= self.high_critical_min
    }
}

impl Default for HitChanceParams {
    fn default() -> Self {
        Self {
            base: 50,
            min: 5,
            max: 95,
            critical_max: 5,
            high_critical_min: 96,
        }
    }
}

/// Damage scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageParams {
    pub crit_multiplier: u32,
    /// Strength above this threshold adds brawling damage.
    pub strength_bonus_threshold: u32,
    /// Every `strength_bonus_step` points above the threshold add one damage.
    pub strength_bonus_step: u32,
    /// Next-action bonus for a successful grapple.
    pub grapple_hold_bonus: i32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            crit_multiplier: 2,
            strength_bonus_threshold: 12,
            strength_bonus_step: 3,
            grapple_hold_bonus: 15,
        }
    }
}

/// Accuracy bonus or penalty by range band, relative to a weapon's
/// effective range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeCurve {
    pub point_blank: i32,
    pub short: i32,
    pub medium: i32,
    pub long: i32,
    pub extreme: i32,
}

impl Default for RangeCurve {
    fn default() -> Self {
        Self {
            point_blank: 15,
            short: 5,
            medium: 0,
            long: -15,
            extreme: -30,
        }
    }
}
