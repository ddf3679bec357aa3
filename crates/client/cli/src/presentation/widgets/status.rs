//! Status panel for one combatant: strength gauge, weapon and wounds.

use combat_view::{CombatantStatus, PresentationMapper};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::presentation::RatatuiTheme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    status: &CombatantStatus,
    is_active: bool,
    theme: &RatatuiTheme,
) {
    let mut title_style = theme.label();
    if is_active {
        title_style = theme.emphasize_active(title_style);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(status.title(), title_style));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let strength_style = theme.style_strength(status.level);
    let gauge = Gauge::default()
        .gauge_style(strength_style)
        .ratio(status.strength_ratio())
        .label(format!("Strength {}", status.strength_text()));
    frame.render_widget(gauge, rows[0]);

    let mut lines = vec![Line::from(vec![
        Span::styled("Weapon: ", theme.label()),
        Span::raw(status.weapon.text()),
    ])];

    if status.wounds.is_empty() {
        lines.push(Line::from(Span::styled("No wounds", theme.muted())));
    } else {
        lines.push(Line::from(Span::styled("Wounds:", theme.label())));
        lines.extend(status.wounds.iter().map(|wound| {
            Line::from(Span::styled(
                format!("  {}", wound.text()),
                theme.style_wound(wound.severity),
            ))
        }));
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(details, rows[1]);
}
