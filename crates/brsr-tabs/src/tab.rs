//! Tab data structure

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brsr_navigation::{HistoryLog, NavigationKind, Observation};

use crate::error::TabError;
use crate::state::NavState;
use crate::Result;

const DEFAULT_TITLE: &str = "New Tab";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier, stable for the tab's lifetime
    pub id: String,
    /// Label of the native surface bound to this tab; never reused
    pub webview_label: String,
    /// Last known page title
    pub title: String,
    /// Visited URLs with the current position; the tab's URL is its current entry
    history: HistoryLog,
    pub state: NavState,
}

impl Tab {
    pub fn new(url: String) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let key = Uuid::new_v4().simple();

        Ok(Self {
            id: format!("tab-{}", key),
            webview_label: format!("webview-{}", key),
            title: DEFAULT_TITLE.to_string(),
            history: HistoryLog::new(url),
            state: NavState::Idle,
        })
    }

    /// Current URL
    pub fn url(&self) -> &str {
        self.history.current()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_navigating()
    }

    /// Commit a navigation the native layer accepted
    pub fn commit_navigation(&mut self, url: &str) -> bool {
        self.history.record(url)
    }

    /// Commit a back step the native layer accepted
    pub fn step_back(&mut self) -> Result<&str> {
        Ok(self.history.back()?)
    }

    /// Commit a forward step the native layer accepted
    pub fn step_forward(&mut self) -> Result<&str> {
        Ok(self.history.forward()?)
    }

    /// Fold a URL reported by the native surface into history
    pub fn observe_navigation(&mut self, url: &str, kind: Option<NavigationKind>) -> Observation {
        let observation = self.history.observe(url, kind);

        if observation != Observation::Unchanged {
            tracing::debug!(
                tab_id = %self.id,
                url = %url,
                ?observation,
                index = self.history.index(),
                "Observed navigation"
            );
        }

        observation
    }

    /// Update the title; blank titles and repeats are ignored
    pub fn set_title(&mut self, title: &str) -> bool {
        if title.trim().is_empty() || self.title == title {
            return false;
        }

        self.title = title.to_string();
        true
    }

    pub fn begin_navigation(&mut self) {
        self.transition_to(NavState::Navigating);
    }

    pub fn finish_navigation(&mut self) {
        self.transition_to(NavState::Idle);
    }

    fn transition_to(&mut self, new_state: NavState) {
        if self.state == new_state {
            return;
        }

        tracing::debug!(
            tab_id = %self.id,
            from = %self.state,
            to = %new_state,
            "Tab state transition"
        );

        self.state = new_state;
    }
}
