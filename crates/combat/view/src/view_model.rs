//! Whole-screen view model built from a [`CombatSnapshot`].

use combat_core::{CombatSnapshot, CombatState, CombatType, PlayerAction, Side, TurnPhase};

use crate::log::LogPanel;
use crate::status::CombatantStatus;
use crate::summary::SummaryCard;

/// Top line of the combat screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderView {
    pub combat_type: Option<CombatType>,
    pub round: Option<u32>,
    /// Position inside the two-round brawling cycle.
    pub brawling_round: Option<u32>,
    pub range: Option<u32>,
    pub phase_label: String,
}

impl HeaderView {
    fn new(snapshot: &CombatSnapshot) -> Self {
        let (round, brawling_round, range) = match &snapshot.state {
            Some(CombatState::Brawling(state)) => {
                (Some(state.round), Some(state.display_round()), None)
            }
            Some(CombatState::Weapon(state)) => {
                (Some(state.round), None, Some(state.current_range))
            }
            None => (None, None, None),
        };

        let phase_label = match snapshot.phase {
            TurnPhase::Ended => "Combat over".to_string(),
            TurnPhase::OpponentPending { .. } => format!("{} is acting...", snapshot.opponent.name),
            TurnPhase::AwaitingPlayerAction if snapshot.combat_type.is_none() => {
                "Choose brawling or weapon combat".to_string()
            }
            TurnPhase::AwaitingPlayerAction => "Your move".to_string(),
        };

        Self {
            combat_type: snapshot.combat_type,
            round,
            brawling_round,
            range,
            phase_label,
        }
    }

    pub fn title(&self) -> String {
        let mut title = match self.combat_type {
            Some(CombatType::Brawling) => "Brawling".to_string(),
            Some(CombatType::Weapon) => "Weapon combat".to_string(),
            None => "Combat".to_string(),
        };
        if let Some(round) = self.round {
            title.push_str(&format!(" | Round {round}"));
            if let Some(sub) = self.brawling_round {
                title.push_str(&format!(" ({sub} of 2)"));
            }
        }
        if let Some(range) = self.range {
            title.push_str(&format!(" | Range {range}"));
        }
        title
    }
}

/// Main area: the live log while fighting, the summary once it is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatPanel {
    Live(LogPanel),
    Summary(SummaryCard),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatViewModel {
    pub header: HeaderView,
    pub player: CombatantStatus,
    pub opponent: CombatantStatus,
    pub active_side: Side,
    pub is_processing: bool,
    pub panel: CombatPanel,
    /// Actions offered in the current mode, empty while the opponent acts.
    pub actions: Vec<PlayerAction>,
    /// The trailing log lines, kept visible under the summary card too.
    pub log: LogPanel,
    pub diagnostics: Vec<String>,
}

impl CombatViewModel {
    pub fn from_snapshot(snapshot: &CombatSnapshot, log_rows: usize) -> Self {
        let (player_slot, opponent_slot) = match &snapshot.state {
            Some(CombatState::Weapon(state)) => (
                Some(state.slot(Side::Player)),
                Some(state.slot(Side::Opponent)),
            ),
            _ => (None, None),
        };

        let log = LogPanel::new(&snapshot.log, log_rows);
        let panel = match &snapshot.summary {
            Some(summary) => CombatPanel::Summary(SummaryCard::new(summary)),
            None => CombatPanel::Live(log.clone()),
        };

        let actions = if snapshot.is_processing || snapshot.is_combat_ended() {
            Vec::new()
        } else {
            match snapshot.combat_type {
                Some(CombatType::Brawling) => vec![PlayerAction::Punch, PlayerAction::Grapple],
                Some(CombatType::Weapon) => vec![
                    PlayerAction::Fire,
                    PlayerAction::Aim,
                    PlayerAction::Reload,
                    PlayerAction::Move(
                        snapshot
                            .state
                            .as_ref()
                            .and_then(|state| match state {
                                CombatState::Weapon(weapon) => Some(weapon.current_range),
                                CombatState::Brawling(_) => None,
                            })
                            .unwrap_or_default(),
                    ),
                ],
                None => Vec::new(),
            }
        };

        Self {
            header: HeaderView::new(snapshot),
            player: CombatantStatus::new(&snapshot.player, player_slot),
            opponent: CombatantStatus::new(&snapshot.opponent, opponent_slot),
            active_side: snapshot.active_side,
            is_processing: snapshot.is_processing,
            panel,
            actions,
            log,
            diagnostics: snapshot.diagnostics.clone(),
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.panel, CombatPanel::Summary(_))
    }
}
