//! Range slider shown during weapon combat.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, LineGauge},
};

use crate::state::RangeSlider;

pub fn render(frame: &mut Frame, area: Rect, slider: &RangeSlider, current_range: Option<u32>) {
    let title = match current_range {
        Some(range) => format!("Move target (now at {range})"),
        None => "Move target".to_string(),
    };

    let gauge = LineGauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .filled_style(Style::default().fg(Color::LightBlue))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .ratio(slider.ratio())
        .label(format!("{:>3} ", slider.value));

    frame.render_widget(gauge, area);
}
