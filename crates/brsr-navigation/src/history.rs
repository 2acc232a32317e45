//! Per-tab history log
//!
//! History is an ordered list of visited URLs (oldest first) plus a cursor
//! marking the current entry. Fresh navigations truncate everything after
//! the cursor and append; back/forward only move the cursor.
//!
//! The free functions are the pure contract over `(history, cursor)`;
//! [`HistoryLog`] owns the pair and keeps `cursor < len` at all times.

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::Result;

/// Append `url` after `cursor`, discarding forward entries.
///
/// Recording the URL already at the cursor returns the input unchanged.
pub fn record(history: &[String], cursor: usize, url: &str) -> (Vec<String>, usize) {
    if history.get(cursor).is_some_and(|current| current == url) {
        return (history.to_vec(), cursor);
    }

    let keep = (cursor + 1).min(history.len());
    let mut entries = Vec::with_capacity(keep + 1);
    entries.extend_from_slice(&history[..keep]);
    entries.push(url.to_string());

    let cursor = entries.len() - 1;
    (entries, cursor)
}

pub fn move_back(cursor: usize) -> Option<usize> {
    cursor.checked_sub(1)
}

pub fn move_forward(cursor: usize, len: usize) -> Option<usize> {
    can_go_forward(cursor, len).then_some(cursor + 1)
}

pub fn can_go_back(cursor: usize) -> bool {
    cursor > 0
}

pub fn can_go_forward(cursor: usize, len: usize) -> bool {
    cursor + 1 < len
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistoryLog")]
pub struct HistoryLog {
    entries: Vec<String>,
    index: usize,
}

/// Unchecked wire form; a log always has an entry under its cursor
#[derive(Deserialize)]
struct RawHistoryLog {
    entries: Vec<String>,
    index: usize,
}

impl TryFrom<RawHistoryLog> for HistoryLog {
    type Error = String;

    fn try_from(raw: RawHistoryLog) -> std::result::Result<Self, Self::Error> {
        if raw.index >= raw.entries.len() {
            return Err(format!(
                "history cursor {} out of range for {} entries",
                raw.index,
                raw.entries.len()
            ));
        }

        Ok(Self {
            entries: raw.entries,
            index: raw.index,
        })
    }
}

impl HistoryLog {
    /// Start a log whose only entry is `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entries: vec![url.into()],
            index: 0,
        }
    }

    /// URL at the cursor
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        can_go_back(self.index)
    }

    pub fn can_go_forward(&self) -> bool {
        can_go_forward(self.index, self.entries.len())
    }

    /// Record a fresh visit. Returns false when `url` is already current.
    pub fn record(&mut self, url: &str) -> bool {
        if self.current() == url {
            return false;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
        true
    }

    /// Step the cursor back one entry and return the new current URL
    pub fn back(&mut self) -> Result<&str> {
        let index = move_back(self.index).ok_or(NavigationError::CannotGoBack)?;
        self.index = index;
        Ok(self.current())
    }

    /// Step the cursor forward one entry and return the new current URL
    pub fn forward(&mut self) -> Result<&str> {
        let index =
            move_forward(self.index, self.entries.len()).ok_or(NavigationError::CannotGoForward)?;
        self.index = index;
        Ok(self.current())
    }

    /// Move the cursor to an existing entry without touching the entries
    pub(crate) fn seek(&mut self, index: usize) {
        debug_assert!(index < self.entries.len());
        self.index = index.min(self.entries.len() - 1);
    }
}
