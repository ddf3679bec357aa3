//! Footer widget displaying context-sensitive key bindings.

use combat_core::CombatType;
use combat_view::CombatViewModel;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::RatatuiTheme;
use crate::state::AppState;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &CombatViewModel,
    app_state: &AppState,
    theme: &RatatuiTheme,
) {
    let keys = if view.is_ended() {
        "[Enter] Return to the story | [q] Quit"
    } else if view.is_processing {
        "Waiting for the opponent... | [q] Quit"
    } else {
        match view.header.combat_type {
            None => "[b] Brawling | [w] Weapon combat | [q] Quit",
            Some(CombatType::Brawling) => "[p/Enter] Punch | [g] Grapple | [q] Quit",
            Some(CombatType::Weapon) => {
                "[f/Enter] Fire | [a] Aim | [r] Reload | [←/→] Range [Shift] x10 | [m] Move | [q] Quit"
            }
        }
    };

    let mut spans = vec![Span::raw(keys)];
    if let Some(notice) = &app_state.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), theme.notice()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
