use tracing::warn;

use crate::clock::{Clock, ManualClock};
use crate::config::CombatConfig;
use crate::dice::{DiceRoller, PcgDice};
use crate::model::{CharacterSnapshot, Combatant, Side};

use super::{CombatSession, CombatState, Dispatcher, EndCallback};

/// Assembles a [`CombatSession`].
///
/// Unset seams default to a frozen [`ManualClock`], [`PcgDice`] seeded with 0
/// and a dispatcher that discards everything.
pub struct CombatSessionBuilder {
    player: Combatant,
    opponent: Option<Combatant>,
    config: CombatConfig,
    clock: Option<Box<dyn Clock>>,
    dice: Option<Box<dyn DiceRoller>>,
    dispatcher: Option<Box<dyn Dispatcher>>,
    on_combat_end: Option<EndCallback>,
    resume: Option<CombatState>,
    diagnostics: Vec<String>,
}

impl CombatSessionBuilder {
    pub fn new(player: Combatant, opponent: Option<Combatant>) -> Self {
        Self {
            player,
            opponent,
            config: CombatConfig::default(),
            clock: None,
            dice: None,
            dispatcher: None,
            on_combat_end: None,
            resume: None,
            diagnostics: Vec::new(),
        }
    }

    /// Start from character snapshots.
    ///
    /// Weapon data that cannot be used leaves that side unarmed and is kept
    /// as a diagnostic on the session.
    pub fn from_snapshots(
        player: &CharacterSnapshot,
        opponent: Option<&CharacterSnapshot>,
    ) -> Self {
        let mut diagnostics = Vec::new();
        let mut load = |snapshot: &CharacterSnapshot, side: Side| {
            let (combatant, problem) = Combatant::from_snapshot(snapshot);
            if let Some(error) = problem {
                warn!(%side, character = %snapshot.name, %error, "ignoring malformed weapon data");
                diagnostics.push(format!("{}: {error}", snapshot.name));
            }
            combatant
        };

        let player = load(player, Side::Player);
        let opponent = opponent.map(|snapshot| load(snapshot, Side::Opponent));

        let mut builder = Self::new(player, opponent);
        builder.diagnostics = diagnostics;
        builder
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn dice(mut self, dice: impl DiceRoller + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    pub fn dispatcher(mut self, dispatcher: impl Dispatcher + 'static) -> Self {
        self.dispatcher = Some(Box::new(dispatcher));
        self
    }

    /// Called once with the winner and summary text when combat ends.
    pub fn on_combat_end(mut self, callback: impl FnMut(Side, &str) + Send + 'static) -> Self {
        self.on_combat_end = Some(Box::new(callback));
        self
    }

    /// Continue an interrupted encounter from its last dispatched state.
    pub fn resume(mut self, prior: Option<CombatState>) -> Self {
        self.resume = prior;
        self
    }

    /// Build the session, or `None` while the opponent is absent.
    ///
    /// A missing opponent skips any resume without error; combat only starts
    /// once both participants are present.
    pub fn build(self) -> Option<CombatSession> {
        let Some(opponent) = self.opponent else {
            if self.resume.is_some() {
                warn!("opponent absent; skipping combat resume");
            }
            return None;
        };

        Some(CombatSession::start(
            self.player,
            opponent,
            self.config,
            self.clock
                .unwrap_or_else(|| Box::new(ManualClock::default())),
            self.dice.unwrap_or_else(|| Box::new(PcgDice::new(0))),
            self.dispatcher.unwrap_or_else(|| Box::new(())),
            self.on_combat_end,
            self.resume,
            self.diagnostics,
        ))
    }
}
