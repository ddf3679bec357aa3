//! End-of-combat summary card.

use combat_view::{PresentationMapper, SummaryCard};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::presentation::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, card: &SummaryCard, theme: &RatatuiTheme) {
    let mut lines = vec![
        Line::from(Span::styled(card.headline, theme.style_summary(card.winner))),
        Line::default(),
        Line::from(card.results.clone()),
        Line::default(),
    ];
    lines.extend(
        card.stat_lines
            .iter()
            .map(|stat| Line::from(Span::styled(stat.clone(), theme.label()))),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(card.prompt, theme.notice())));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Combat Over"));

    frame.render_widget(paragraph, area);
}
