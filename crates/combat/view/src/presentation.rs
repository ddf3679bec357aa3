//! Framework-agnostic styling hooks.

use combat_core::{LogKind, Side, WoundSeverity};

use crate::status::StrengthLevel;

/// Maps presentation state to a frontend's style type.
///
/// Views decide *what* is shown; a mapper decides how it looks, so the same
/// view models can drive a terminal UI or anything else.
pub trait PresentationMapper {
    /// Style type for this frontend (e.g. `ratatui::style::Style`).
    type Style: Clone;

    /// Strength indicator colour for a severity band.
    fn style_strength(&self, level: StrengthLevel) -> Self::Style;

    fn style_wound(&self, severity: WoundSeverity) -> Self::Style;

    fn style_log(&self, kind: LogKind) -> Self::Style;

    /// Headline style of the summary card.
    fn style_summary(&self, winner: Side) -> Self::Style;

    /// Highlight the side whose action is awaited.
    fn emphasize_active(&self, base_style: Self::Style) -> Self::Style;

    /// Strength style straight from current/max values.
    fn style_strength_ratio(&self, current: u32, maximum: u32) -> Self::Style {
        self.style_strength(StrengthLevel::from_ratio(current, maximum))
    }
}
