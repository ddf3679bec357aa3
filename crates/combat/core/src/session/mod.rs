//! Combat orchestrator.
//!
//! [`CombatSession`] owns both participants and the state of the selected
//! combat type. It is the only component that reports to the application
//! store, and it drives the turn state machine:
//!
//! ```text
//! SelectingType --select--> Active --knockout--> Ended --return_to_narrative
//!                              |
//!     AwaitingPlayerAction --submit--> OpponentPending{due_at} --poll--+
//!              ^                                                       |
//!              +-------------------------------------------------------+
//! ```
//!
//! The opponent's counter-turn is only resolved by [`CombatSession::poll`]
//! (once the injected clock reaches `due_at`) or
//! [`CombatSession::resolve_opponent_turn`]. Nothing inside the engine sleeps.

mod builder;
mod dispatch;
mod phase;
mod summary;

pub use builder::CombatSessionBuilder;
pub use dispatch::{Dispatcher, RecordingDispatcher, StoreAction};
pub use phase::{CombatMode, CombatState, CombatType, PlayerAction, TurnPhase};
pub use summary::{CombatStats, CombatSummary};

use tracing::{debug, info, warn};

use crate::clock::{Clock, Timestamp};
use crate::config::CombatConfig;
use crate::dice::DiceRoller;
use crate::error::{CombatError, CombatFault};
use crate::log::{CombatLogEntry, LogBook, merge_logs};
use crate::model::{Combatant, Side, Weapon};
use crate::round::{BrawlingState, Fighters, HalfTurn, WeaponCombatState, WeaponSlot};

/// Combat-end callback: `(winner, summary_text)`.
pub type EndCallback = Box<dyn FnMut(Side, &str) + Send>;

/// Read-only view of a session for presentation and debugging.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub now: Timestamp,
    pub combat_type: Option<CombatType>,
    pub phase: TurnPhase,
    pub is_processing: bool,
    /// Side whose action is awaited.
    pub active_side: Side,
    pub player: Combatant,
    pub opponent: Combatant,
    pub state: Option<CombatState>,
    /// Merged, chronologically ordered log.
    pub log: Vec<CombatLogEntry>,
    pub summary: Option<CombatSummary>,
    pub diagnostics: Vec<String>,
}

impl CombatSnapshot {
    pub fn is_combat_ended(&self) -> bool {
        self.summary.is_some()
    }
}

/// One encounter between the player and an opponent.
pub struct CombatSession {
    fighters: Fighters,
    mode: CombatMode,
    phase: TurnPhase,
    config: CombatConfig,
    clock: Box<dyn Clock>,
    dice: Box<dyn DiceRoller>,
    dispatcher: Box<dyn Dispatcher>,
    on_combat_end: Option<EndCallback>,
    /// Orchestrator entries (start, selection, end) merged with the round log.
    session_log: LogBook,
    stats: CombatStats,
    diagnostics: Vec<String>,
    combat_active: bool,
}

impl core::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatSession")
            .field("fighters", &self.fighters)
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl CombatSession {
    pub fn builder(player: Combatant, opponent: Option<Combatant>) -> CombatSessionBuilder {
        CombatSessionBuilder::new(player, opponent)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn start(
        player: Combatant,
        opponent: Combatant,
        config: CombatConfig,
        clock: Box<dyn Clock>,
        dice: Box<dyn DiceRoller>,
        dispatcher: Box<dyn Dispatcher>,
        on_combat_end: Option<EndCallback>,
        resume: Option<CombatState>,
        diagnostics: Vec<String>,
    ) -> Self {
        let mut session = Self {
            fighters: Fighters::new(player, opponent),
            mode: CombatMode::SelectingType,
            phase: TurnPhase::AwaitingPlayerAction,
            config,
            clock,
            dice,
            dispatcher,
            on_combat_end,
            session_log: LogBook::new(),
            stats: CombatStats::default(),
            diagnostics,
            combat_active: true,
        };

        let now = session.clock.now();
        let opening = format!("{} squares up against you.", session.fighters.opponent.name);
        session.session_log.push(CombatLogEntry::info(opening, now));
        for diagnostic in &session.diagnostics {
            session
                .session_log
                .push(CombatLogEntry::info(format!("Note: {diagnostic}"), now));
        }
        session.dispatcher.dispatch(StoreAction::SetCombatActive(true));

        match resume.and_then(|prior| session.accept_resume(prior, now)) {
            Some(prior) => {
                info!(
                    combat_type = %prior.combat_type(),
                    round = prior.round(),
                    "resuming combat"
                );
                session.session_log.push(CombatLogEntry::info(
                    format!("Combat resumes in round {}.", prior.round()),
                    now,
                ));
                session.mode = CombatMode::Active(prior);
                session.end_if_already_decided();
            }
            None => info!(
                player = %session.fighters.player.name,
                opponent = %session.fighters.opponent.name,
                "combat started"
            ),
        }
        session
    }

    // ---------------------------------------------------------------------
    // Accessors

    pub fn player(&self) -> &Combatant {
        &self.fighters.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.fighters.opponent
    }

    pub fn mode(&self) -> &CombatMode {
        &self.mode
    }

    pub fn state(&self) -> Option<&CombatState> {
        self.mode.state()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn combat_type(&self) -> Option<CombatType> {
        self.mode.combat_type()
    }

    pub fn summary(&self) -> Option<&CombatSummary> {
        self.mode.summary()
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn is_ended(&self) -> bool {
        self.mode.is_ended()
    }

    /// Whether a player action is being processed (the opponent's counter
    /// is still pending). New player actions are rejected meanwhile.
    pub fn is_processing(&self) -> bool {
        matches!(self.phase, TurnPhase::OpponentPending { .. })
    }

    /// When the pending opponent turn becomes due.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.phase.due_at()
    }

    /// Side whose data the status panel should highlight.
    pub fn active_side(&self) -> Side {
        if self.is_processing() {
            Side::Opponent
        } else {
            Side::Player
        }
    }

    /// Session and round logs merged chronologically.
    pub fn merged_log(&self) -> Vec<CombatLogEntry> {
        let round_log = self
            .state()
            .map(|state| state.round_log().entries())
            .unwrap_or_default();
        merge_logs(self.session_log.entries(), round_log)
    }

    pub fn inspect(&self) -> CombatSnapshot {
        CombatSnapshot {
            now: self.clock.now(),
            combat_type: self.combat_type(),
            phase: self.phase,
            is_processing: self.is_processing(),
            active_side: self.active_side(),
            player: self.fighters.player.clone(),
            opponent: self.fighters.opponent.clone(),
            state: self.state().cloned(),
            log: self.merged_log(),
            summary: self.summary().cloned(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Transitions

    /// Pick brawling or weapon combat. The choice cannot be changed.
    ///
    /// Entering weapon combat arms an unarmed NPC opponent with the default
    /// revolver at full ammunition.
    pub fn select_combat_type(&mut self, combat_type: CombatType) -> Result<(), CombatError> {
        match &self.mode {
            CombatMode::SelectingType => {}
            CombatMode::Active(_) => return Err(CombatError::CombatTypeAlreadySelected),
            CombatMode::Ended { .. } => return Err(CombatError::CombatEnded),
        }

        let now = self.clock.now();
        let state = match combat_type {
            CombatType::Brawling => {
                self.session_log
                    .push(CombatLogEntry::info("You raise your fists.", now));
                CombatState::Brawling(BrawlingState::new())
            }
            CombatType::Weapon => {
                self.arm_unarmed_opponent(now);
                let player = slot_for(&self.fighters.player);
                let opponent = slot_for(&self.fighters.opponent);
                let text = match &player.weapon {
                    Some(weapon) => format!("You draw your {}.", weapon.name),
                    None => "You have no weapon equipped.".to_string(),
                };
                self.session_log.push(CombatLogEntry::info(text, now));
                CombatState::Weapon(WeaponCombatState::new(
                    player,
                    opponent,
                    self.config.starting_range,
                ))
            }
        };

        info!(%combat_type, "combat type selected");
        self.mode = CombatMode::Active(state);
        self.dispatch_state();
        self.end_if_already_decided();
        Ok(())
    }

    /// Resolve a player action.
    ///
    /// On success the opponent's counter is scheduled `opponent_delay_ms`
    /// later, unless the action ended the fight. A rejected action changes
    /// nothing.
    pub fn submit(&mut self, action: PlayerAction) -> Result<HalfTurn, CombatError> {
        match self.phase {
            TurnPhase::Ended => return Err(CombatError::CombatEnded),
            TurnPhase::OpponentPending { .. } => return Err(CombatError::ActionInProgress),
            TurnPhase::AwaitingPlayerAction => {}
        }

        let now = self.clock.now();
        let turn = self.resolve_half_turn(Side::Player, action, now)?;
        debug!(action = action.name(), "player action resolved");
        self.settle(turn.clone());

        if !self.is_ended() {
            let due_at = now.after(self.config.opponent_delay_ms);
            self.phase = TurnPhase::OpponentPending { due_at };
        }
        Ok(turn)
    }

    /// Resolve the opponent's counter if it is due.
    pub fn poll(&mut self) -> Option<HalfTurn> {
        let due_at = self.phase.due_at()?;
        if self.clock.now() < due_at {
            return None;
        }
        self.resolve_opponent_turn()
    }

    /// Resolve the pending opponent counter now, ignoring its due time.
    pub fn resolve_opponent_turn(&mut self) -> Option<HalfTurn> {
        self.phase.due_at()?;

        let now = self.clock.now();
        let turn = self.opponent_half_turn(now)?;
        self.settle(turn.clone());
        if !self.is_ended() {
            self.phase = TurnPhase::AwaitingPlayerAction;
        }
        Some(turn)
    }

    /// Abandon a scheduled opponent turn without applying it.
    ///
    /// Used on teardown. Returns whether anything was pending.
    pub fn cancel_pending(&mut self) -> bool {
        match self.phase {
            TurnPhase::OpponentPending { due_at } => {
                debug!(%due_at, "pending opponent turn cancelled");
                self.phase = TurnPhase::AwaitingPlayerAction;
                true
            }
            _ => false,
        }
    }

    /// Leave the ended combat and clear the combat-active flag in the store.
    pub fn return_to_narrative(&mut self) -> Result<CombatSummary, CombatError> {
        let summary = self.summary().cloned().ok_or(CombatError::NotEnded)?;
        if self.combat_active {
            self.combat_active = false;
            self.dispatcher.dispatch(StoreAction::SetCombatActive(false));
            info!("returned to narrative");
        }
        Ok(summary)
    }

    // ---------------------------------------------------------------------
    // Internals

    fn resolve_half_turn(
        &mut self,
        actor: Side,
        action: PlayerAction,
        now: Timestamp,
    ) -> Result<HalfTurn, CombatError> {
        let Self {
            mode,
            fighters,
            dice,
            config,
            ..
        } = self;
        match mode {
            CombatMode::SelectingType => Err(CombatError::CombatTypeNotSelected),
            CombatMode::Ended { .. } => Err(CombatError::CombatEnded),
            CombatMode::Active(CombatState::Brawling(state)) => {
                let blow = action.as_brawling().ok_or(CombatError::ActionNotAvailable {
                    action: action.name(),
                    mode: "brawling",
                })?;
                Ok(state.resolve(actor, blow, fighters, &mut **dice, &config.tables, now))
            }
            CombatMode::Active(CombatState::Weapon(state)) => {
                let weapon_action = action.as_weapon().ok_or(CombatError::ActionNotAvailable {
                    action: action.name(),
                    mode: "weapon",
                })?;
                state.resolve(actor, weapon_action, fighters, &mut **dice, config, now)
            }
        }
    }

    fn opponent_half_turn(&mut self, now: Timestamp) -> Option<HalfTurn> {
        let Self {
            mode,
            fighters,
            dice,
            config,
            ..
        } = self;
        let turn = match mode {
            CombatMode::Active(CombatState::Brawling(state)) => {
                let action = state.choose_opponent_action(fighters);
                state.resolve(
                    Side::Opponent,
                    action,
                    fighters,
                    &mut **dice,
                    &config.tables,
                    now,
                )
            }
            CombatMode::Active(CombatState::Weapon(state)) => {
                let action = state.choose_opponent_action(config);
                match state.resolve(Side::Opponent, action, fighters, &mut **dice, config, now)
                {
                    Ok(turn) => turn,
                    Err(error) => {
                        warn!(%error, ?action, "opponent action rejected; holding position");
                        state.hold(Side::Opponent, fighters, now)
                    }
                }
            }
            // A pending turn only exists while combat is active.
            CombatMode::SelectingType | CombatMode::Ended { .. } => return None,
        };
        Some(turn)
    }

    /// Report a resolved half-turn to the store and end combat on knockout.
    fn settle(&mut self, turn: HalfTurn) {
        self.stats.record(turn.actor, turn.damage);

        if turn.wound.is_some() {
            let update = match turn.target() {
                Side::Player => StoreAction::SetCharacter(self.fighters.player.clone()),
                Side::Opponent => StoreAction::SetOpponent(self.fighters.opponent.clone()),
            };
            self.dispatcher.dispatch(update);
        }
        self.dispatch_state();

        if let Some(winner) = turn.winner() {
            self.finish(winner);
        }
    }

    fn dispatch_state(&mut self) {
        if let Some(state) = self.state() {
            let action = StoreAction::UpdateCombatState(state.clone());
            self.dispatcher.dispatch(action);
        }
    }

    /// Keep a prior state only if it passes [`CombatState::check_resumable`].
    /// A rejected state is noted and the encounter starts fresh.
    fn accept_resume(&mut self, prior: CombatState, now: Timestamp) -> Option<CombatState> {
        match prior.check_resumable(&self.config) {
            Ok(()) => Some(prior),
            Err(error) => {
                warn!(%error, code = error.error_code(), "skipping combat resume");
                let diagnostic = format!("resume skipped: {error}");
                self.session_log
                    .push(CombatLogEntry::info(format!("Note: {diagnostic}"), now));
                self.diagnostics.push(diagnostic);
                None
            }
        }
    }

    /// End immediately when a side is already out, e.g. after resuming a
    /// state saved at the moment of a knockout.
    fn end_if_already_decided(&mut self) {
        if self.fighters.player.is_knocked_out() {
            self.finish(Side::Opponent);
        } else if self.fighters.opponent.is_knocked_out() {
            self.finish(Side::Player);
        }
    }

    /// Produce the one summary of this encounter.
    fn finish(&mut self, winner: Side) {
        let CombatMode::Active(state) = &self.mode else {
            return;
        };

        let stats = CombatStats {
            rounds: state.round(),
            ..self.stats
        };
        let summary = CombatSummary::new(winner, &self.fighters.opponent.name, stats);
        let state = state.clone();

        let now = self.clock.now();
        self.session_log
            .push(CombatLogEntry::info(summary.results.clone(), now));
        self.mode = CombatMode::Ended {
            state,
            summary: summary.clone(),
        };
        self.phase = TurnPhase::Ended;

        info!(
            %winner,
            rounds = stats.rounds,
            damage_dealt = stats.damage_dealt,
            damage_taken = stats.damage_taken,
            "combat ended"
        );

        self.dispatcher
            .dispatch(StoreAction::EndCombat(summary.clone()));
        if let Some(callback) = self.on_combat_end.as_mut() {
            callback(winner, &summary.results);
        }
    }

    fn arm_unarmed_opponent(&mut self, now: Timestamp) {
        let opponent = &mut self.fighters.opponent;
        if !opponent.is_npc || opponent.weapon.is_some() {
            return;
        }

        let weapon = Weapon::colt_revolver();
        info!(opponent = %opponent.name, weapon = %weapon.name, "arming unarmed opponent");
        let text = match weapon.ammunition {
            Some(rounds) => format!(
                "{} draws a {} ({rounds} rounds).",
                opponent.name, weapon.name
            ),
            None => format!("{} draws a {}.", opponent.name, weapon.name),
        };
        opponent.weapon = Some(weapon);

        self.session_log.push(CombatLogEntry::info(text, now));
        let update = StoreAction::SetOpponent(self.fighters.opponent.clone());
        self.dispatcher.dispatch(update);
    }
}

fn slot_for(combatant: &Combatant) -> WeaponSlot {
    match &combatant.weapon {
        Some(weapon) => WeaponSlot::armed(weapon.clone()),
        None => WeaponSlot::unarmed(),
    }
}
