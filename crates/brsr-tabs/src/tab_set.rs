//! Ordered tab set
//!
//! Owns every tab in strip order plus the active tab id. The active id is
//! either `None` or names a tab currently in the set.

use crate::error::TabError;
use crate::tab::Tab;
use crate::Result;

#[derive(Debug, Default)]
pub struct TabSet {
    tabs: Vec<Tab>,
    active_tab_id: Option<String>,
}

impl TabSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new tab for `url` and make it active
    pub fn open(&mut self, url: String) -> Result<&Tab> {
        let tab = Tab::new(url)?;

        tracing::info!(
            tab_id = %tab.id,
            label = %tab.webview_label,
            url = %tab.url(),
            "Created new tab"
        );

        self.active_tab_id = Some(tab.id.clone());
        self.tabs.push(tab);

        let index = self.tabs.len() - 1;
        Ok(&self.tabs[index])
    }

    /// Remove a tab. When it was active, the tab now at its position (or
    /// the new last tab) becomes active.
    pub fn close(&mut self, tab_id: &str) -> Result<Tab> {
        let index = self
            .position(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        let tab = self.tabs.remove(index);

        if self.active_tab_id.as_deref() == Some(tab_id) {
            self.active_tab_id = self
                .tabs
                .get(index.min(self.tabs.len().saturating_sub(1)))
                .map(|next| next.id.clone());
        }

        tracing::info!(
            tab_id = %tab_id,
            active_tab_id = ?self.active_tab_id,
            "Closed tab"
        );

        Ok(tab)
    }

    /// Make a tab active; history is untouched
    pub fn select(&mut self, tab_id: &str) -> Result<&Tab> {
        let index = self
            .position(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        self.active_tab_id = Some(tab_id.to_string());
        Ok(&self.tabs[index])
    }

    pub fn get(&self, tab_id: &str) -> Result<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    pub fn get_mut(&mut self, tab_id: &str) -> Result<&mut Tab> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    pub fn find_by_label(&self, label: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.webview_label == label)
    }

    pub fn find_by_label_mut(&mut self, label: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.webview_label == label)
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active_tab_id
            .as_deref()
            .and_then(|id| self.tabs.iter().find(|t| t.id == id))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    pub fn is_active(&self, tab_id: &str) -> bool {
        self.active_tab_id.as_deref() == Some(tab_id)
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
