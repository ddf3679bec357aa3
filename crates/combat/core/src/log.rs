//! Combat log entries and chronological merging.

use crate::clock::Timestamp;

/// Kind of a log line, used by the presentation layer for coloring.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogKind {
    Hit,
    Miss,
    Critical,
    Info,
}

/// One line of combat narration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub text: String,
    pub kind: LogKind,
    pub timestamp: Timestamp,
}

impl CombatLogEntry {
    pub fn new(text: impl Into<String>, kind: LogKind, timestamp: Timestamp) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp,
        }
    }

    pub fn info(text: impl Into<String>, timestamp: Timestamp) -> Self {
        Self::new(text, LogKind::Info, timestamp)
    }
}

/// Append-only log whose timestamps never go backwards.
///
/// A timestamp earlier than the last entry is raised to the last entry's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LogBook {
    entries: Vec<CombatLogEntry>,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<CombatLogEntry>) -> Self {
        entries.sort_by_key(|entry| entry.timestamp);
        Self { entries }
    }

    /// Append an entry and return it as stored.
    pub fn push(&mut self, mut entry: CombatLogEntry) -> &CombatLogEntry {
        if let Some(last) = self.entries.last() {
            entry.timestamp = entry.timestamp.max(last.timestamp);
        }
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CombatLogEntry> {
        self.entries
    }
}

/// Merge two logs into one chronological list.
///
/// The sort is stable, so entries with equal timestamps keep `first`-then-
/// `second` order. An entry with the same timestamp and text as one already
/// merged is dropped.
pub fn merge_logs(first: &[CombatLogEntry], second: &[CombatLogEntry]) -> Vec<CombatLogEntry> {
    let mut merged: Vec<CombatLogEntry> = first.iter().chain(second).cloned().collect();
    merged.sort_by_key(|entry| entry.timestamp);

    let mut out: Vec<CombatLogEntry> = Vec::with_capacity(merged.len());
    for entry in merged {
        let duplicate = out
            .iter()
            .rev()
            .take_while(|kept| kept.timestamp == entry.timestamp)
            .any(|kept| kept.text == entry.text);
        if !duplicate {
            out.push(entry);
        }
    }
    out
}
