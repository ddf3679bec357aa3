//! Header widget: combat type, round, range and whose move it is.

use combat_view::HeaderView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, header: &HeaderView, is_processing: bool) {
    let phase_style = if is_processing {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };

    let text = Line::from(vec![
        Span::styled(header.title(), Style::default().fg(Color::White)),
        Span::raw(" | "),
        Span::styled(header.phase_label.clone(), phase_style),
    ]);

    let paragraph =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Combat"));

    frame.render_widget(paragraph, area);
}
