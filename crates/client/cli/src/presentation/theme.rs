//! Ratatui implementation of [`PresentationMapper`].

use combat_core::{LogKind, Side, WoundSeverity};
use combat_view::{PresentationMapper, StrengthLevel};
use ratatui::style::{Color, Modifier, Style};

/// Frontier palette for the combat screen.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatatuiTheme;

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }

    pub fn label(&self) -> Style {
        Style::default().fg(Color::White)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn notice(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }
}

impl PresentationMapper for RatatuiTheme {
    type Style = Style;

    fn style_strength(&self, level: StrengthLevel) -> Self::Style {
        let color = match level {
            StrengthLevel::Normal => Color::Green,
            StrengthLevel::Warning => Color::Yellow,
            StrengthLevel::Critical => Color::Red,
        };
        Style::default().fg(color)
    }

    fn style_wound(&self, severity: WoundSeverity) -> Self::Style {
        match severity {
            WoundSeverity::Light => Style::default().fg(Color::Yellow),
            WoundSeverity::Serious => Style::default().fg(Color::LightRed),
            WoundSeverity::Mortal => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn style_log(&self, kind: LogKind) -> Self::Style {
        match kind {
            LogKind::Hit => Style::default().fg(Color::LightRed),
            LogKind::Miss => Style::default().fg(Color::Gray),
            LogKind::Critical => Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            LogKind::Info => Style::default().fg(Color::Cyan),
        }
    }

    fn style_summary(&self, winner: Side) -> Self::Style {
        let color = match winner {
            Side::Player => Color::Green,
            Side::Opponent => Color::Red,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn emphasize_active(&self, base_style: Self::Style) -> Self::Style {
        base_style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }
}
