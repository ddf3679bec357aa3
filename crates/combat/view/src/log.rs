//! Scrolling combat log.

use combat_core::{CombatLogEntry, LogKind, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub kind: LogKind,
    pub timestamp: Timestamp,
}

impl From<&CombatLogEntry> for LogLine {
    fn from(entry: &CombatLogEntry) -> Self {
        Self {
            text: entry.text.clone(),
            kind: entry.kind,
            timestamp: entry.timestamp,
        }
    }
}

/// Log panel pinned to the newest entry.
///
/// `offset` is the index of the first visible line; it always leaves the last
/// entry on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogPanel {
    pub lines: Vec<LogLine>,
    pub visible_rows: usize,
    pub offset: usize,
}

impl LogPanel {
    pub fn new(entries: &[CombatLogEntry], visible_rows: usize) -> Self {
        let lines: Vec<LogLine> = entries.iter().map(LogLine::from).collect();
        let offset = lines.len().saturating_sub(visible_rows);
        Self {
            lines,
            visible_rows,
            offset,
        }
    }

    pub fn visible(&self) -> &[LogLine] {
        let end = (self.offset + self.visible_rows).min(self.lines.len());
        &self.lines[self.offset.min(end)..end]
    }

    pub fn latest(&self) -> Option<&LogLine> {
        self.lines.last()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
