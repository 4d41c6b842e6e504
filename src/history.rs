//! Recent log history
//!
//! Pure data structure holding the last N rendered lines for the overlay
//! and for export. No I/O side effects.

use crate::constants::DEFAULT_HISTORY_LENGTH;
use std::collections::VecDeque;

/// Bounded ring buffer of rendered log lines.
///
/// Lines are stored exactly as written to the sink, including the trailing
/// newline. Oldest lines are dropped once the bound is exceeded. There is no
/// clear operation: history lives as long as its logger.
#[derive(Debug, Clone)]
pub struct RecentLogBuffer {
    lines: VecDeque<String>,
    history_length: usize,
}

impl Default for RecentLogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LENGTH)
    }
}

impl RecentLogBuffer {
    /// Create a buffer retaining at most `history_length` lines
    pub fn new(history_length: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(history_length.min(DEFAULT_HISTORY_LENGTH)),
            history_length,
        }
    }

    /// Add a line, rotating out the oldest if over capacity
    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        if self.lines.len() > self.history_length {
            self.lines.pop_front();
        }
    }

    /// Change the bound, evicting oldest lines if the buffer is now too long
    pub fn set_history_length(&mut self, history_length: usize) {
        self.history_length = history_length;
        while self.lines.len() > history_length {
            self.lines.pop_front();
        }
    }

    pub fn history_length(&self) -> usize {
        self.history_length
    }

    /// Retained lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Concatenate every retained line in insertion order
    pub fn render(&self) -> String {
        self.lines.iter().map(String::as_str).collect()
    }
}
