//! Tab to native surface bindings
//!
//! Each live tab owns at most one native surface, keyed by tab id and
//! addressed on the host by the tab's webview label. A binding starts out
//! pending and is created on the first reconciliation that has a usable
//! content box. Creation is attempted once: a failed surface stays failed
//! for the rest of the tab's life.
//!
//! Only the active tab's surface is shown and placed. Hidden surfaces keep
//! whatever bounds they last had.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use brsr_tabs::Tab;

use crate::geometry::{Bounds, GeometryConfig};
use crate::host::{SurfaceError, SurfaceHost, SurfaceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceStatus {
    /// Waiting for a usable content box
    Pending,
    Created,
    /// The host rejected creation
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub label: String,
    pub status: SurfaceStatus,
    /// Visibility last applied on the host; `None` until one is applied
    pub visible: Option<bool>,
    /// Native bounds last applied on the host
    pub last_bounds: Option<Bounds>,
}

impl Binding {
    fn pending(label: &str) -> Self {
        Self {
            label: label.to_string(),
            status: SurfaceStatus::Pending,
            visible: None,
            last_bounds: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Creation {
    Created,
    AlreadyCreated,
    /// No usable content box yet; retried on a later frame
    Deferred,
}

/// Outcome of a navigation command routed to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Issued,
    /// The surface does not exist yet and will load the tab's URL when it is
    /// created
    Deferred,
}

pub struct BindingRegistry<H> {
    host: H,
    geometry: GeometryConfig,
    bindings: HashMap<String, Binding>,
}

impl<H: SurfaceHost> BindingRegistry<H> {
    pub fn new(host: H, geometry: GeometryConfig) -> Self {
        Self {
            host,
            geometry,
            bindings: HashMap::new(),
        }
    }

    pub fn binding(&self, tab_id: &str) -> Option<&Binding> {
        self.bindings.get(tab_id)
    }

    pub fn status(&self, tab_id: &str) -> SurfaceStatus {
        self.bindings
            .get(tab_id)
            .map(|b| b.status)
            .unwrap_or(SurfaceStatus::Pending)
    }

    pub fn has_pending(&self) -> bool {
        self.bindings
            .values()
            .any(|b| b.status == SurfaceStatus::Pending)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Create the surface for a tab if it does not exist yet.
    ///
    /// `content` is the measured content box; creation is deferred while it
    /// is missing or too small. A new surface gets `visible` applied right
    /// away.
    pub async fn ensure_created(
        &mut self,
        tab_id: &str,
        label: &str,
        url: &str,
        content: Option<Bounds>,
        visible: bool,
    ) -> SurfaceResult<Creation> {
        let binding = self
            .bindings
            .entry(tab_id.to_string())
            .or_insert_with(|| Binding::pending(label));

        match binding.status {
            SurfaceStatus::Created => return Ok(Creation::AlreadyCreated),
            SurfaceStatus::Failed => return Err(SurfaceError::Unavailable(tab_id.to_string())),
            SurfaceStatus::Pending => {}
        }

        let Some(content) = content.filter(|c| self.geometry.is_placeable(c)) else {
            tracing::trace!(tab_id = %tab_id, label = %label, "Deferring surface creation");
            return Ok(Creation::Deferred);
        };

        let bounds = self.geometry.placement(content);

        if let Err(e) = self.host.create_surface(label, url, bounds).await {
            tracing::error!(tab_id = %tab_id, label = %label, "Failed to create surface: {}", e);
            if let Some(binding) = self.bindings.get_mut(tab_id) {
                binding.status = SurfaceStatus::Failed;
            }
            return Err(e);
        }

        tracing::info!(tab_id = %tab_id, label = %label, url = %url, "Created surface");

        if let Some(binding) = self.bindings.get_mut(tab_id) {
            binding.status = SurfaceStatus::Created;
            binding.last_bounds = Some(bounds);
        }

        if let Err(e) = self.set_visible(tab_id, visible).await {
            tracing::warn!(tab_id = %tab_id, "Failed to apply initial visibility: {}", e);
        }

        Ok(Creation::Created)
    }

    /// Show or hide a created surface; pending surfaces are left alone
    pub async fn set_visible(&mut self, tab_id: &str, visible: bool) -> SurfaceResult<()> {
        let Some(binding) = self.bindings.get(tab_id) else {
            return Ok(());
        };

        if binding.status != SurfaceStatus::Created || binding.visible == Some(visible) {
            return Ok(());
        }

        if visible {
            self.host.show_surface(&binding.label).await?;
        } else {
            self.host.hide_surface(&binding.label).await?;
        }

        if let Some(binding) = self.bindings.get_mut(tab_id) {
            binding.visible = Some(visible);
        }
        Ok(())
    }

    /// Move a created surface to fill `content`. Returns whether the host
    /// was called.
    pub async fn update_bounds(&mut self, tab_id: &str, content: Bounds) -> SurfaceResult<bool> {
        let Some(binding) = self.bindings.get(tab_id) else {
            return Ok(false);
        };

        let bounds = self.geometry.placement(content);
        if binding.status != SurfaceStatus::Created || binding.last_bounds == Some(bounds) {
            return Ok(false);
        }

        self.host
            .update_surface_bounds(&binding.label, bounds)
            .await?;

        if let Some(binding) = self.bindings.get_mut(tab_id) {
            binding.last_bounds = Some(bounds);
        }
        Ok(true)
    }

    /// Drop a tab's binding and close its surface. Bookkeeping is cleared
    /// even when the host fails to close it; unknown tabs are ignored.
    pub async fn destroy(&mut self, tab_id: &str) -> SurfaceResult<()> {
        let Some(binding) = self.bindings.remove(tab_id) else {
            return Ok(());
        };

        if binding.status != SurfaceStatus::Created {
            tracing::debug!(tab_id = %tab_id, status = ?binding.status, "Dropped binding without surface");
            return Ok(());
        }

        match self.host.close_surface(&binding.label).await {
            Ok(()) => {
                tracing::info!(tab_id = %tab_id, label = %binding.label, "Closed surface");
                Ok(())
            }
            Err(e) => {
                tracing::error!(tab_id = %tab_id, label = %binding.label, "Failed to close surface: {}", e);
                Err(e)
            }
        }
    }

    /// Close every surface
    pub async fn destroy_all(&mut self) {
        let tab_ids: Vec<String> = self.bindings.keys().cloned().collect();
        for tab_id in tab_ids {
            // Failures are logged by destroy
            let _ = self.destroy(&tab_id).await;
        }
    }

    pub async fn navigate(&self, tab_id: &str, url: &str) -> SurfaceResult<Dispatch> {
        match self.target(tab_id)? {
            Some(label) => {
                self.host.navigate(label, url).await?;
                Ok(Dispatch::Issued)
            }
            None => Ok(Dispatch::Deferred),
        }
    }

    pub async fn back(&self, tab_id: &str) -> SurfaceResult<Dispatch> {
        match self.target(tab_id)? {
            Some(label) => {
                self.host.navigate_back(label).await?;
                Ok(Dispatch::Issued)
            }
            None => Ok(Dispatch::Deferred),
        }
    }

    pub async fn forward(&self, tab_id: &str) -> SurfaceResult<Dispatch> {
        match self.target(tab_id)? {
            Some(label) => {
                self.host.navigate_forward(label).await?;
                Ok(Dispatch::Issued)
            }
            None => Ok(Dispatch::Deferred),
        }
    }

    pub async fn reload(&self, tab_id: &str) -> SurfaceResult<Dispatch> {
        match self.target(tab_id)? {
            Some(label) => {
                self.host.reload(label).await?;
                Ok(Dispatch::Issued)
            }
            None => Ok(Dispatch::Deferred),
        }
    }

    /// Label to send a command to, or `None` while the surface is pending
    fn target(&self, tab_id: &str) -> SurfaceResult<Option<&str>> {
        match self.bindings.get(tab_id) {
            Some(binding) => match binding.status {
                SurfaceStatus::Created => Ok(Some(binding.label.as_str())),
                SurfaceStatus::Pending => Ok(None),
                SurfaceStatus::Failed => Err(SurfaceError::Unavailable(tab_id.to_string())),
            },
            None => Ok(None),
        }
    }

    /// Bring the bindings in line with the tab set.
    ///
    /// Surfaces of closed tabs are closed, pending surfaces are created when
    /// `content` allows, every surface but the active one is hidden, and the
    /// active one is placed and shown. Failures are logged per tab and never
    /// stop the pass. Returns the ids of tabs whose surface was created.
    pub async fn reconcile(
        &mut self,
        tabs: &[Tab],
        active_tab_id: Option<&str>,
        content: Option<Bounds>,
    ) -> Vec<String> {
        let orphans: Vec<String> = self
            .bindings
            .keys()
            .filter(|id| !tabs.iter().any(|t| &t.id == *id))
            .cloned()
            .collect();

        for tab_id in orphans {
            // Failures are logged by destroy
            let _ = self.destroy(&tab_id).await;
        }

        let mut created = Vec::new();

        for tab in tabs {
            let visible = active_tab_id == Some(tab.id.as_str());
            // Creation failures are logged by ensure_created
            if let Ok(Creation::Created) = self
                .ensure_created(&tab.id, &tab.webview_label, tab.url(), content, visible)
                .await
            {
                created.push(tab.id.clone());
            }
        }

        for tab in tabs {
            if active_tab_id == Some(tab.id.as_str()) {
                continue;
            }
            if let Err(e) = self.set_visible(&tab.id, false).await {
                tracing::warn!(tab_id = %tab.id, "Failed to hide surface: {}", e);
            }
        }

        if let Some(active) = active_tab_id {
            if let Some(content) = content.filter(|c| self.geometry.is_placeable(c)) {
                if let Err(e) = self.update_bounds(active, content).await {
                    tracing::warn!(tab_id = %active, "Failed to update surface bounds: {}", e);
                }
            }
            if let Err(e) = self.set_visible(active, true).await {
                tracing::warn!(tab_id = %active, "Failed to show surface: {}", e);
            }
        }

        created
    }
}
