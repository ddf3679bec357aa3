use tracing::debug;

use crate::clock::Timestamp;
use crate::config::CombatTables;
use crate::dice::DiceRoller;
use crate::error::ResumeError;
use crate::log::{CombatLogEntry, LogBook, LogKind};
use crate::model::{Side, Wound};
use crate::resolution::{BrawlingAction, BrawlingOutcome, BrawlingResult, roll_brawling_round};

use super::{Fighters, HalfTurn, object, subject, verb};

/// Unarmed combat state.
///
/// Brawling is structured as two alternating rounds. `round` counts every
/// completed exchange and only ever grows; [`display_round`](Self::display_round)
/// folds it onto the two-round structure for presentation. Combat continues
/// until a knockout regardless of the round number.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrawlingState {
    pub round: u32,
    /// Carried-over modifier for the player's next blow.
    pub player_modifier: i32,
    /// Carried-over modifier for the opponent's next blow.
    pub opponent_modifier: i32,
    pub round_log: LogBook,
}

impl Default for BrawlingState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrawlingState {
    pub const ROUNDS_PER_CYCLE: u32 = 2;

    pub fn new() -> Self {
        Self {
            round: 1,
            player_modifier: 0,
            opponent_modifier: 0,
            round_log: LogBook::new(),
        }
    }

    /// Round number within the two-round structure (1 or 2).
    pub fn display_round(&self) -> u32 {
        (self.round.max(1) - 1) % Self::ROUNDS_PER_CYCLE + 1
    }

    /// Reject a dispatched state that could not have come from play.
    pub fn check_resumable(&self) -> Result<(), ResumeError> {
        if self.round == 0 {
            return Err(ResumeError::InvalidRound { round: self.round });
        }
        Ok(())
    }

    pub fn modifier(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_modifier,
            Side::Opponent => self.opponent_modifier,
        }
    }

    fn set_modifier(&mut self, side: Side, value: i32) {
        match side {
            Side::Player => self.player_modifier = value,
            Side::Opponent => self.opponent_modifier = value,
        }
    }

    /// The opponent's move: grapple when weaker than the player, else punch.
    pub fn choose_opponent_action(&self, fighters: &Fighters) -> BrawlingAction {
        if fighters.opponent.current_strength() < fighters.player.current_strength() {
            BrawlingAction::Grapple
        } else {
            BrawlingAction::Punch
        }
    }

    /// Roll and apply one blow by `actor`.
    pub fn resolve(
        &mut self,
        actor: Side,
        action: BrawlingAction,
        fighters: &mut Fighters,
        dice: &mut (impl DiceRoller + ?Sized),
        tables: &CombatTables,
        now: Timestamp,
    ) -> HalfTurn {
        let outcome = roll_brawling_round(
            fighters.get(actor),
            action,
            self.modifier(actor),
            dice,
            tables,
        );
        self.apply_outcome(actor, outcome, fighters, now)
    }

    /// Apply an already-resolved blow by `actor`.
    ///
    /// Appends one log entry, wounds the target on a hit and advances the
    /// round once the opponent's counter lands without a knockout.
    pub fn apply_outcome(
        &mut self,
        actor: Side,
        outcome: BrawlingOutcome,
        fighters: &mut Fighters,
        now: Timestamp,
    ) -> HalfTurn {
        self.set_modifier(actor, outcome.next_round_modifier);

        let round = self.round;
        let (attacker, defender) = fighters.split(actor);
        let attacker_name = subject(actor, attacker);
        let defender_name = object(actor.opposite(), defender);
        let action_verb = verb(actor, outcome.action.as_ref());

        let wound = match outcome.location {
            Some(location) if outcome.damage > 0 => Some(Wound::from_hit(
                location,
                outcome.damage,
                defender.max_strength(),
                outcome.result.is_critical(),
                round,
            )),
            _ => None,
        };

        let target_strength = match &wound {
            Some(wound) => defender.receive_wound(wound.clone()),
            None => defender.current_strength(),
        };
        let knockout = target_strength == 0;

        let text = match (outcome.result, outcome.location) {
            (result, Some(location)) if result.is_hit() => format!(
                "{attacker_name} {action_verb} {defender_name}: {result} to the {location} for {} damage.",
                outcome.damage
            ),
            _ => format!("{attacker_name} {action_verb} at {defender_name}: Miss."),
        };
        let kind = match outcome.result {
            BrawlingResult::CriticalHit => LogKind::Critical,
            r if r.is_hit() => LogKind::Hit,
            _ => LogKind::Miss,
        };
        let entry = self
            .round_log
            .push(CombatLogEntry::new(text, kind, now))
            .clone();

        debug!(
            actor = %actor,
            action = %outcome.action,
            roll = outcome.roll,
            result = %outcome.result,
            damage = outcome.damage,
            target_strength,
            "brawling half-turn resolved"
        );

        if actor == Side::Opponent && !knockout {
            self.round += 1;
        }

        HalfTurn {
            actor,
            entry,
            damage: outcome.damage,
            wound,
            target_strength,
            knockout,
        }
    }
}
