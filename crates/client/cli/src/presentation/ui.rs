//! Frame layout for the combat screen.
//!
//! The view model is rebuilt from a [`CombatSnapshot`] on every draw so the
//! log panel always fits the current terminal height.
use anyhow::Result;
use combat_core::{CombatSnapshot, CombatState, CombatType, Side};
use combat_view::{CombatPanel, CombatViewModel};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::{RatatuiTheme, terminal::Tui, widgets};
use crate::state::AppState;

const HEADER_HEIGHT: u16 = 3;
const RANGE_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const STATUS_WIDTH: u16 = 40;

pub fn render(
    terminal: &mut Tui,
    snapshot: &CombatSnapshot,
    app_state: &AppState,
    theme: &RatatuiTheme,
) -> Result<()> {
    terminal.draw(|frame| render_frame(frame, snapshot, app_state, theme))?;
    Ok(())
}

fn render_frame(
    frame: &mut Frame,
    snapshot: &CombatSnapshot,
    app_state: &AppState,
    theme: &RatatuiTheme,
) {
    let show_range = snapshot.combat_type == Some(CombatType::Weapon) && !snapshot.is_combat_ended();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(if show_range { RANGE_HEIGHT } else { 0 }),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(STATUS_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    let view = CombatViewModel::from_snapshot(snapshot, log_rows(body[1]));

    widgets::header::render(frame, chunks[0], &view.header, view.is_processing);
    render_status_column(frame, body[0], &view, theme);

    match &view.panel {
        CombatPanel::Live(log) => widgets::log::render(frame, body[1], log, theme),
        CombatPanel::Summary(card) => widgets::summary::render(frame, body[1], card, theme),
    }

    if show_range {
        let current_range = match &snapshot.state {
            Some(CombatState::Weapon(state)) => Some(state.current_range),
            _ => None,
        };
        widgets::range::render(frame, chunks[2], &app_state.range, current_range);
    }

    widgets::footer::render(frame, chunks[3], &view, app_state, theme);
}

fn render_status_column(frame: &mut Frame, area: Rect, view: &CombatViewModel, theme: &RatatuiTheme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let awaiting = !view.is_processing && !view.is_ended();
    widgets::status::render(
        frame,
        rows[0],
        &view.player,
        awaiting && view.active_side == Side::Player,
        theme,
    );
    widgets::status::render(
        frame,
        rows[1],
        &view.opponent,
        view.is_processing && view.active_side == Side::Opponent,
        theme,
    );
}

/// Log lines that fit inside a bordered panel.
fn log_rows(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(2))
}
