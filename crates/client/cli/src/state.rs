//! UI state that lives outside the combat session.

use combat_core::{CombatConfig, CombatSnapshot, CombatState};

/// Target range chosen before a weapon-combat move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeSlider {
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

impl RangeSlider {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            value: config.starting_range,
            min: config.min_range,
            max: config.max_range,
        }
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn nudge(&mut self, delta: i32) {
        let value = i64::from(self.value) + i64::from(delta);
        let value = value.clamp(i64::from(self.min), i64::from(self.max));
        self.value = u32::try_from(value).unwrap_or(self.min);
    }

    /// Fill ratio for a gauge, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        let span = self.max.saturating_sub(self.min);
        if span == 0 {
            return 1.0;
        }
        f64::from(self.value.saturating_sub(self.min)) / f64::from(span)
    }
}

pub struct AppState {
    pub range: RangeSlider,
    /// Last rejection or notice, shown in the footer until the next action.
    pub notice: Option<String>,
    range_synced: bool,
}

impl AppState {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            range: RangeSlider::new(config),
            notice: None,
            range_synced: false,
        }
    }

    /// Start the slider at the current range the first time weapon combat
    /// shows up, so resumed encounters do not jump back to the default.
    pub fn sync(&mut self, snapshot: &CombatSnapshot) {
        if self.range_synced {
            return;
        }
        if let Some(CombatState::Weapon(state)) = &snapshot.state {
            self.range.set(state.current_range);
            self.range_synced = true;
        }
    }
}
