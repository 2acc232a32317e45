//! Folding native navigation reports into a history log
//!
//! The native surface navigates on its own (links, in-page history, user
//! gestures) and only reports the URL it landed on. Without a navigation
//! type from the host, a report is looked up by its first occurrence in the
//! log; if that entry sits directly before or after the cursor it is taken
//! as a back/forward replay, anything else is a fresh visit. A genuine
//! back/forward step moves the cursor by one, so a jump to a distant entry
//! is treated as a new visit and keeps the entries between.
//!
//! URLs are compared in parsed form: the native layer reports the
//! canonical URL (`https://x.com/`) for an address typed as `https://x.com`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::history::HistoryLog;

/// Navigation type, when the host is able to report it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    BackForward,
    Fresh,
}

/// How an observed URL was folded into the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The URL is already current
    Unchanged,
    /// The cursor moved to an existing entry
    Replay { from: usize, to: usize },
    /// The URL was appended; `discarded` forward entries were dropped
    Fresh { discarded: usize },
}

impl HistoryLog {
    /// Decide what an observed URL means for this log without changing it
    pub fn classify(&self, url: &str, kind: Option<NavigationKind>) -> Observation {
        if same_url(self.current(), url) {
            return Observation::Unchanged;
        }

        let target = match kind {
            Some(NavigationKind::Fresh) => None,
            Some(NavigationKind::BackForward) => self.nearest(url),
            None => self.adjacent(url),
        };

        match target {
            Some(to) => Observation::Replay {
                from: self.index(),
                to,
            },
            None => Observation::Fresh {
                discarded: self.len() - (self.index() + 1),
            },
        }
    }

    /// Apply an observed URL and report what was done
    pub fn observe(&mut self, url: &str, kind: Option<NavigationKind>) -> Observation {
        let observation = self.classify(url, kind);
        match observation {
            Observation::Unchanged => {}
            Observation::Replay { to, .. } => self.seek(to),
            Observation::Fresh { .. } => {
                self.record(url);
            }
        }
        observation
    }

    /// First entry holding `url`, if it is one step from the cursor
    fn adjacent(&self, url: &str) -> Option<usize> {
        let first = self
            .entries()
            .iter()
            .position(|entry| same_url(entry, url))?;

        (first.abs_diff(self.index()) <= 1).then_some(first)
    }

    /// Occurrence of `url` closest to the cursor, at any distance
    fn nearest(&self, url: &str) -> Option<usize> {
        let index = self.index();
        self.entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| same_url(entry, url))
            .map(|(i, _)| i)
            .min_by_key(|&i| i.abs_diff(index))
    }
}

/// Equal as parsed URLs, or as strings when either does not parse
fn same_url(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
