//! Read-only view of the browser for presentational components

use serde::Serialize;

use brsr_tabs::Tab;

use crate::registry::SurfaceStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub webview_label: String,
    pub history: Vec<String>,
    pub history_index: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub surface: SurfaceStatus,
}

impl TabView {
    pub fn new(tab: &Tab, surface: SurfaceStatus) -> Self {
        Self {
            id: tab.id.clone(),
            title: tab.title.clone(),
            url: tab.url().to_string(),
            webview_label: tab.webview_label.clone(),
            history: tab.history().entries().to_vec(),
            history_index: tab.history_index(),
            can_go_back: tab.can_go_back(),
            can_go_forward: tab.can_go_forward(),
            is_loading: tab.is_loading(),
            surface,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BrowserSnapshot {
    pub tabs: Vec<TabView>,
    pub active_tab_id: Option<String>,
    /// Back/forward availability of the active tab
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl BrowserSnapshot {
    pub fn active(&self) -> Option<&TabView> {
        let id = self.active_tab_id.as_deref()?;
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn tab(&self, tab_id: &str) -> Option<&TabView> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }
}
