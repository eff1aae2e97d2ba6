//! # Calculation History
//!
//! Append-only record of completed calculations.
//!
//! The record is unbounded for the lifetime of the session; only the newest
//! [`HISTORY_WINDOW`] entries are ever shown.

use std::fmt;

use crate::number::format_number;
use crate::types::Operation;

/// Number of history lines the display shows.
pub const HISTORY_WINDOW: usize = 3;

/// One completed calculation.
///
/// Renders as `"<left> <symbol> <right> = <result>"`, e.g. `"5 + 3 = 8"`.
/// Operands are the parsed values, so an entry typed as `"5."` shows `5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub left: f64,
    pub operation: Operation,
    pub right: f64,
    pub result: f64,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            format_number(self.left),
            self.operation.symbol(),
            format_number(self.right),
            format_number(self.result)
        )
    }
}

/// All calculations of the session, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries the display shows: the newest [`HISTORY_WINDOW`], oldest first.
    pub fn visible(&self) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(HISTORY_WINDOW);
        &self.entries[start..]
    }

    /// Rendered lines for [`History::visible`].
    pub fn visible_lines(&self) -> Vec<String> {
        self.visible().iter().map(ToString::to_string).collect()
    }
}
