use tracing::{debug, warn};

use crate::clock::Timestamp;
use crate::config::CombatConfig;
use crate::dice::DiceRoller;
use crate::error::{CombatError, ResumeError};
use crate::log::{CombatLogEntry, LogBook, LogKind};
use crate::model::{Side, Weapon, Wound};
use crate::resolution::{
    DamageSpec, ShotResult, calculate_weapon_modifier, roll_for_malfunction, roll_shot_with,
};

use super::{Fighters, HalfTurn, object, possessive, subject, verb};

/// Armed actions available to either side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponAction {
    /// Build up an aim bonus for the next shot.
    Aim,
    /// Shoot (or throw) at the other side.
    Fire,
    /// Change the distance between the combatants.
    Move { target_range: u32 },
    /// Refill ammunition and clear a malfunction.
    Reload,
}

impl WeaponAction {
    pub fn kind(&self) -> WeaponActionKind {
        match self {
            Self::Aim => WeaponActionKind::Aim,
            Self::Fire => WeaponActionKind::Fire,
            Self::Move { .. } => WeaponActionKind::Move,
            Self::Reload => WeaponActionKind::Reload,
        }
    }
}

/// What a side did last. `Malfunction` blocks firing until a reload.
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
pub enum WeaponActionKind {
    Aim,
    Fire,
    Move,
    Reload,
    Malfunction,
}

/// One side's weapon and its per-combat condition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSlot {
    pub weapon: Option<Weapon>,
    /// Rounds left when the weapon tracks ammunition.
    pub ammunition: Option<u32>,
    pub aim_bonus: i32,
    pub last_action: Option<WeaponActionKind>,
}

impl WeaponSlot {
    pub fn armed(weapon: Weapon) -> Self {
        Self {
            ammunition: weapon.ammunition,
            weapon: Some(weapon),
            aim_bonus: 0,
            last_action: None,
        }
    }

    pub fn unarmed() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> Option<u32> {
        self.weapon.as_ref().and_then(|weapon| weapon.ammunition)
    }

    pub fn is_jammed(&self) -> bool {
        self.last_action == Some(WeaponActionKind::Malfunction)
    }

    pub fn can_reload(&self) -> bool {
        match (self.ammunition, self.capacity()) {
            _ if self.is_jammed() => true,
            (Some(current), Some(max)) => current < max,
            _ => false,
        }
    }

    /// Record an action without hiding an uncleared malfunction.
    fn record(&mut self, action: WeaponActionKind) {
        if !self.is_jammed() || action == WeaponActionKind::Reload {
            self.last_action = Some(action);
        }
    }
}

/// Armed combat state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponCombatState {
    /// Completed exchanges plus one; only ever grows.
    pub round: u32,
    pub player_weapon: WeaponSlot,
    pub opponent_weapon: WeaponSlot,
    pub current_range: u32,
    pub round_log: LogBook,
}

impl WeaponCombatState {
    pub fn new(player: WeaponSlot, opponent: WeaponSlot, starting_range: u32) -> Self {
        Self {
            round: 1,
            player_weapon: player,
            opponent_weapon: opponent,
            current_range: starting_range,
            round_log: LogBook::new(),
        }
    }

    pub fn slot(&self, side: Side) -> &WeaponSlot {
        match side {
            Side::Player => &self.player_weapon,
            Side::Opponent => &self.opponent_weapon,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut WeaponSlot {
        match side {
            Side::Player => &mut self.player_weapon,
            Side::Opponent => &mut self.opponent_weapon,
        }
    }

    /// Reject a dispatched state that could not have come from play: a
    /// zero round, a range off the slider, more rounds than the weapon holds
    /// or an aim bonus past the cap.
    pub fn check_resumable(&self, config: &CombatConfig) -> Result<(), ResumeError> {
        if self.round == 0 {
            return Err(ResumeError::InvalidRound { round: self.round });
        }
        if !config.range_in_bounds(self.current_range) {
            return Err(ResumeError::RangeOutOfBounds {
                range: self.current_range,
                min: config.min_range,
                max: config.max_range,
            });
        }
        for side in [Side::Player, Side::Opponent] {
            let slot = self.slot(side);
            if let Some(ammunition) = slot.ammunition {
                let capacity = slot.capacity().unwrap_or(0);
                if ammunition > capacity {
                    return Err(ResumeError::AmmunitionOverCapacity {
                        side,
                        ammunition,
                        capacity,
                    });
                }
            }
            if !(0..=config.max_aim_bonus).contains(&slot.aim_bonus) {
                return Err(ResumeError::AimBonusOutOfBounds {
                    side,
                    aim_bonus: slot.aim_bonus,
                    max: config.max_aim_bonus,
                });
            }
        }
        Ok(())
    }

    /// The player's last action.
    pub fn last_action(&self) -> Option<WeaponActionKind> {
        self.player_weapon.last_action
    }

    /// Accuracy modifier `side` would shoot with right now.
    pub fn current_modifier(&self, side: Side, config: &CombatConfig) -> Option<i32> {
        let slot = self.slot(side);
        slot.weapon.as_ref().map(|weapon| {
            calculate_weapon_modifier(weapon, self.current_range, slot.aim_bonus, &config.tables)
        })
    }

    /// Check whether `actor` may take `action` without changing anything.
    pub fn validate(
        &self,
        actor: Side,
        action: WeaponAction,
        config: &CombatConfig,
    ) -> Result<(), CombatError> {
        let slot = self.slot(actor);
        match action {
            WeaponAction::Aim => {
                slot.weapon
                    .as_ref()
                    .ok_or(CombatError::NoWeapon { side: actor })?;
            }
            WeaponAction::Fire => {
                slot.weapon
                    .as_ref()
                    .ok_or(CombatError::NoWeapon { side: actor })?;
                if slot.is_jammed() {
                    return Err(CombatError::WeaponMalfunctioned { side: actor });
                }
                if slot.ammunition == Some(0) {
                    return Err(CombatError::OutOfAmmunition { side: actor });
                }
            }
            WeaponAction::Move { target_range } => {
                if !config.range_in_bounds(target_range) {
                    return Err(CombatError::RangeOutOfBounds {
                        requested: target_range,
                        min: config.min_range,
                        max: config.max_range,
                    });
                }
            }
            WeaponAction::Reload => {
                slot.weapon
                    .as_ref()
                    .ok_or(CombatError::NoWeapon { side: actor })?;
                if !slot.can_reload() {
                    return Err(CombatError::ReloadNotNeeded { side: actor });
                }
            }
        }
        Ok(())
    }

    /// The opponent's move, mirroring the player's action set.
    ///
    /// Reload when jammed or empty, close to half effective range when out
    /// of it, aim once when the shot would carry a penalty, otherwise fire.
    pub fn choose_opponent_action(&self, config: &CombatConfig) -> WeaponAction {
        let slot = &self.opponent_weapon;
        let Some(weapon) = slot.weapon.as_ref() else {
            return WeaponAction::Move {
                target_range: self.current_range,
            };
        };

        if slot.is_jammed() || slot.ammunition == Some(0) {
            return WeaponAction::Reload;
        }
        if self.current_range > weapon.range {
            let target_range = (weapon.range / 2).clamp(config.min_range, config.max_range);
            return WeaponAction::Move { target_range };
        }
        let modifier = self.current_modifier(Side::Opponent, config).unwrap_or(0);
        if slot.aim_bonus == 0 && modifier < 0 {
            return WeaponAction::Aim;
        }
        WeaponAction::Fire
    }

    /// Validate, roll and apply one action by `actor`.
    ///
    /// Appends exactly one log entry on success. A rejected action changes
    /// nothing.
    pub fn resolve(
        &mut self,
        actor: Side,
        action: WeaponAction,
        fighters: &mut Fighters,
        dice: &mut (impl DiceRoller + ?Sized),
        config: &CombatConfig,
        now: Timestamp,
    ) -> Result<HalfTurn, CombatError> {
        self.validate(actor, action, config)?;

        let turn = match action {
            WeaponAction::Aim => self.aim(actor, fighters, config, now),
            WeaponAction::Fire => self.fire(actor, fighters, dice, config, now),
            WeaponAction::Move { target_range } => {
                self.move_to(actor, target_range, fighters, config, now)
            }
            WeaponAction::Reload => self.reload(actor, fighters, now),
        };

        debug!(
            actor = %actor,
            action = ?action,
            range = self.current_range,
            damage = turn.damage,
            target_strength = turn.target_strength,
            "weapon half-turn resolved"
        );

        if actor == Side::Opponent && !turn.knockout {
            self.round += 1;
        }
        Ok(turn)
    }

    /// Let `actor` pass its half-turn without acting.
    pub fn hold(&mut self, actor: Side, fighters: &Fighters, now: Timestamp) -> HalfTurn {
        let who = fighters.get(actor);
        let text = format!("{} {} position.", subject(actor, who), verb(actor, "hold"));
        let turn = self.quiet_turn(actor, fighters, text, now);
        if actor == Side::Opponent {
            self.round += 1;
        }
        turn
    }

    fn quiet_turn(
        &mut self,
        actor: Side,
        fighters: &Fighters,
        text: String,
        now: Timestamp,
    ) -> HalfTurn {
        let entry = self
            .round_log
            .push(CombatLogEntry::info(text, now))
            .clone();
        HalfTurn {
            actor,
            entry,
            damage: 0,
            wound: None,
            target_strength: fighters.get(actor.opposite()).current_strength(),
            knockout: false,
        }
    }

    fn aim(
        &mut self,
        actor: Side,
        fighters: &Fighters,
        config: &CombatConfig,
        now: Timestamp,
    ) -> HalfTurn {
        let slot = self.slot_mut(actor);
        slot.aim_bonus = slot
            .aim_bonus
            .saturating_add(config.aim_step)
            .min(config.max_aim_bonus);
        slot.record(WeaponActionKind::Aim);
        let bonus = slot.aim_bonus;

        let who = fighters.get(actor);
        let text = format!(
            "{} {} aim (aim bonus {bonus:+}).",
            subject(actor, who),
            verb(actor, "take")
        );
        self.quiet_turn(actor, fighters, text, now)
    }

    fn move_to(
        &mut self,
        actor: Side,
        target_range: u32,
        fighters: &Fighters,
        config: &CombatConfig,
        now: Timestamp,
    ) -> HalfTurn {
        let previous = self.current_range;
        self.current_range = target_range;

        let slot = self.slot_mut(actor);
        slot.aim_bonus = 0;
        slot.record(WeaponActionKind::Move);

        let who = fighters.get(actor);
        let text = match self.current_modifier(actor, config) {
            Some(modifier) => format!(
                "{} {} from range {previous} to range {target_range} (accuracy modifier {modifier:+}).",
                subject(actor, who),
                verb(actor, "move")
            ),
            None => format!(
                "{} {} from range {previous} to range {target_range}.",
                subject(actor, who),
                verb(actor, "move")
            ),
        };
        self.quiet_turn(actor, fighters, text, now)
    }

    fn reload(&mut self, actor: Side, fighters: &Fighters, now: Timestamp) -> HalfTurn {
        let slot = self.slot_mut(actor);
        let was_jammed = slot.is_jammed();
        slot.ammunition = slot.capacity();
        slot.record(WeaponActionKind::Reload);

        let weapon_name = slot
            .weapon
            .as_ref()
            .map(|weapon| weapon.name.clone())
            .unwrap_or_default();
        let rounds = match (slot.ammunition, slot.capacity()) {
            (Some(current), Some(max)) => format!(" ({current}/{max})"),
            _ => String::new(),
        };

        let who = fighters.get(actor);
        let text = if was_jammed {
            format!(
                "{} {} the malfunction and {} the {weapon_name}{rounds}.",
                subject(actor, who),
                verb(actor, "clear"),
                verb(actor, "reload")
            )
        } else {
            format!(
                "{} {} the {weapon_name}{rounds}.",
                subject(actor, who),
                verb(actor, "reload")
            )
        };
        self.quiet_turn(actor, fighters, text, now)
    }

    fn fire(
        &mut self,
        actor: Side,
        fighters: &mut Fighters,
        dice: &mut (impl DiceRoller + ?Sized),
        config: &CombatConfig,
        now: Timestamp,
    ) -> HalfTurn {
        let range = self.current_range;
        let slot = self.slot_mut(actor);
        let Some(weapon) = slot.weapon.clone() else {
            // validate() rules this out
            return self.quiet_turn(actor, fighters, String::new(), now);
        };

        if roll_for_malfunction(&weapon, dice) {
            slot.last_action = Some(WeaponActionKind::Malfunction);
            let who = fighters.get(actor);
            let text = format!(
                "{} {} malfunctions!",
                possessive(actor, who),
                weapon.name
            );
            return self.quiet_turn(actor, fighters, text, now);
        }

        if let Some(rounds) = slot.ammunition.as_mut() {
            *rounds = rounds.saturating_sub(1);
        }
        let aim_bonus = slot.aim_bonus;
        slot.aim_bonus = 0;
        slot.record(WeaponActionKind::Fire);

        let damage_spec = DamageSpec::parse(&weapon.damage).unwrap_or_else(|error| {
            warn!(weapon = %weapon.name, %error, "unusable weapon damage; using fallback");
            DamageSpec::FALLBACK
        });

        let round = self.round;
        let (attacker, defender) = fighters.split(actor);
        let shot = roll_shot_with(
            attacker,
            &weapon,
            &damage_spec,
            range,
            aim_bonus,
            dice,
            &config.tables,
        );

        let wound = match shot.location {
            Some(location) if shot.damage > 0 => Some(Wound::from_hit(
                location,
                shot.damage,
                defender.max_strength(),
                shot.result == ShotResult::CriticalHit,
                round,
            )),
            _ => None,
        };
        let target_strength = match &wound {
            Some(wound) => defender.receive_wound(wound.clone()),
            None => defender.current_strength(),
        };

        let shooter = subject(actor, attacker);
        let target = object(actor.opposite(), defender);
        let fires = verb(actor, if weapon.thrown { "throw" } else { "fire" });
        let text = match shot.location {
            Some(location) => format!(
                "{shooter} {fires} at {target}: {} to the {location} for {} damage (modifier {:+}).",
                shot.result, shot.damage, shot.modifier
            ),
            None => format!(
                "{shooter} {fires} at {target}: Miss (modifier {:+}).",
                shot.modifier
            ),
        };
        let kind = match shot.result {
            ShotResult::CriticalHit => LogKind::Critical,
            ShotResult::Hit => LogKind::Hit,
            ShotResult::Miss => LogKind::Miss,
        };
        let entry = self
            .round_log
            .push(CombatLogEntry::new(text, kind, now))
            .clone();

        HalfTurn {
            actor,
            entry,
            damage: shot.damage,
            wound,
            target_strength,
            knockout: target_strength == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::model::{Attributes, Combatant};

    fn fighters() -> Fighters {
        Fighters::new(
            Combatant::new("p", "Player", Attributes::with_strength(15)),
            Combatant::new("o", "Black Bart", Attributes::with_strength(15)).npc(),
        )
    }

    fn state() -> WeaponCombatState {
        WeaponCombatState::new(
            WeaponSlot::armed(Weapon::colt_revolver()),
            WeaponSlot::armed(Weapon::colt_revolver()),
            10,
        )
    }

    #[test]
    fn resumable_state_must_fit_the_config() {
        let config = CombatConfig::default();
        assert_eq!(state().check_resumable(&config), Ok(()));

        let mut far = state();
        far.current_range = 2_000_000_000;
        assert_eq!(
            far.check_resumable(&config),
            Err(ResumeError::RangeOutOfBounds {
                range: 2_000_000_000,
                min: 1,
                max: 100,
            })
        );

        let mut overloaded = state();
        overloaded.opponent_weapon.ammunition = Some(7);
        assert_eq!(
            overloaded.check_resumable(&config),
            Err(ResumeError::AmmunitionOverCapacity {
                side: Side::Opponent,
                ammunition: 7,
                capacity: 6,
            })
        );

        let mut steady = state();
        steady.player_weapon.aim_bonus = i32::MAX;
        assert!(matches!(
            steady.check_resumable(&config),
            Err(ResumeError::AimBonusOutOfBounds { side: Side::Player, .. })
        ));

        let mut early = state();
        early.round = 0;
        assert_eq!(
            early.check_resumable(&config),
            Err(ResumeError::InvalidRound { round: 0 })
        );
    }

    #[test]
    fn aim_accumulates_up_to_cap() {
        let config = CombatConfig::default();
        let mut state = state();
        let mut fighters = fighters();
        let mut dice = ScriptedDice::default();
        for _ in 0..4 {
            state
                .resolve(
                    Side::Player,
                    WeaponAction::Aim,
                    &mut fighters,
                    &mut dice,
                    &config,
                    Timestamp(0),
                )
                .unwrap();
        }
        assert_eq!(state.player_weapon.aim_bonus, config.max_aim_bonus);
        assert_eq!(state.last_action(), Some(WeaponActionKind::Aim));
        assert_eq!(state.round_log.len(), 4);
    }

    #[test]
    fn fire_spends_ammo_and_resets_aim() {
        let config = CombatConfig::default();
        let mut state = state();
        state.player_weapon.aim_bonus = 10;
        let mut fighters = fighters();
        // no malfunction, attack 30, chest, 4 damage
        let mut dice = ScriptedDice::new([1, 30, 50, 4]);
        let turn = state
            .resolve(
                Side::Player,
                WeaponAction::Fire,
                &mut fighters,
                &mut dice,
                &config,
                Timestamp(0),
            )
            .unwrap();
        assert_eq!(turn.damage, 4);
        assert_eq!(state.player_weapon.ammunition, Some(5));
        assert_eq!(state.player_weapon.aim_bonus, 0);
        assert_eq!(fighters.opponent.current_strength(), 11);
        assert_eq!(
            turn.entry.text,
            "You fire at Black Bart: Hit to the chest for 4 damage (modifier +15)."
        );
    }

    #[test]
    fn malfunction_blocks_fire_until_reload() {
        let config = CombatConfig::default();
        let mut state = state();
        let mut fighters = fighters();
        let mut dice = ScriptedDice::new([100]);
        let turn = state
            .resolve(
                Side::Player,
                WeaponAction::Fire,
                &mut fighters,
                &mut dice,
                &config,
                Timestamp(0),
            )
            .unwrap();
        assert_eq!(turn.damage, 0);
        assert_eq!(turn.entry.text, "Your Colt Revolver malfunctions!");
        assert_eq!(state.last_action(), Some(WeaponActionKind::Malfunction));
        // malfunction does not spend a round
        assert_eq!(state.player_weapon.ammunition, Some(6));

        // aiming does not hide the jam
        state
            .resolve(
                Side::Player,
                WeaponAction::Aim,
                &mut fighters,
                &mut dice,
                &config,
                Timestamp(1),
            )
            .unwrap();
        let err = state
            .resolve(
                Side::Player,
                WeaponAction::Fire,
                &mut fighters,
                &mut dice,
                &config,
                Timestamp(2),
            )
            .unwrap_err();
        assert_eq!(err, CombatError::WeaponMalfunctioned { side: Side::Player });

        let reload = state
            .resolve(
                Side::Player,
                WeaponAction::Reload,
                &mut fighters,
                &mut dice,
                &config,
                Timestamp(3),
            )
            .unwrap();
        assert_eq!(
            reload.entry.text,
            "You clear the malfunction and reload the Colt Revolver (6/6)."
        );
        assert_eq!(state.last_action(), Some(WeaponActionKind::Reload));
        assert!(state.validate(Side::Player, WeaponAction::Fire, &config).is_ok());
    }

    #[test]
    fn reload_requires_missing_rounds() {
        let config = CombatConfig::default();
        let state = state();
        assert_eq!(
            state.validate(Side::Player, WeaponAction::Reload, &config),
            Err(CombatError::ReloadNotNeeded { side: Side::Player })
        );
    }

    #[test]
    fn move_is_bounded_and_reports_modifier() {
        let config = CombatConfig::default();
        let mut state = state();
        let mut fighters = fighters();
        let mut dice = ScriptedDice::default();

        let err = state
            .resolve(
                Side::Player,
                WeaponAction::Move { target_range: 0 },
                &mut fighters,
                &mut dice,
                &config,
                Timestamp(0),
            )
            .unwrap_err();
        assert!(matches!(err, CombatError::RangeOutOfBounds { .. }));
        assert!(state.round_log.is_empty());

        let turn = state
            .resolve(
                Side::Player,
                WeaponAction::Move { target_range: 40 },
                &mut fighters,
                &mut dice,
                &config,
                Timestamp(0),
            )
            .unwrap();
        assert_eq!(state.current_range, 40);
        assert_eq!(
            turn.entry.text,
            "You move from range 10 to range 40 (accuracy modifier -15)."
        );
        assert_eq!(turn.damage, 0);
    }

    #[test]
    fn opponent_policy() {
        let config = CombatConfig::default();
        let mut state = state();
        assert_eq!(state.choose_opponent_action(&config), WeaponAction::Fire);

        state.current_range = 35;
        assert_eq!(
            state.choose_opponent_action(&config),
            WeaponAction::Move { target_range: 10 }
        );

        state.current_range = 20;
        if let Some(weapon) = state.opponent_weapon.weapon.as_mut() {
            weapon.accuracy = -5;
        }
        assert_eq!(state.choose_opponent_action(&config), WeaponAction::Aim);

        state.opponent_weapon.ammunition = Some(0);
        assert_eq!(state.choose_opponent_action(&config), WeaponAction::Reload);
    }
}
