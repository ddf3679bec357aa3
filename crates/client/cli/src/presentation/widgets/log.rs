//! Combat log panel, newest entry at the bottom.

use combat_view::{LogPanel, PresentationMapper};
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
};

use crate::presentation::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, panel: &LogPanel, theme: &RatatuiTheme) {
    let items: Vec<ListItem> = panel
        .visible()
        .iter()
        .map(|line| ListItem::new(line.text.clone()).style(theme.style_log(line.kind)))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Combat Log"));

    frame.render_widget(list, area);
}
