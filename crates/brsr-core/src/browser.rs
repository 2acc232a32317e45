//! Browser state and the operations that mutate it
//!
//! [`Browser`] owns the tab set, the surface bindings and the geometry
//! reconciler. User commands and native events are both applied here, one
//! at a time, by the shell runtime.
//!
//! A navigation command touches history only after the host accepted it.
//! Commands for a tab whose surface is still pending update history alone;
//! the surface is created later with the tab's current URL.

use tokio::sync::broadcast;

use brsr_navigation::{normalize_address, NavigationError};
use brsr_tabs::TabSet;

use crate::config::Config;
use crate::events::{InboundEvent, NavigationEvent, RoutedTelemetry, TelemetryEvent, TitleEvent};
use crate::geometry::{ContainerBox, GeometryReconciler};
use crate::host::SurfaceHost;
use crate::registry::{BindingRegistry, Dispatch};
use crate::snapshot::{BrowserSnapshot, TabView};
use crate::Result;

pub(crate) const TELEMETRY_CAPACITY: usize = 256;

pub struct Browser<H> {
    homepage: String,
    tabs: TabSet,
    registry: BindingRegistry<H>,
    geometry: GeometryReconciler,
    telemetry: broadcast::Sender<RoutedTelemetry>,
}

impl<H: SurfaceHost> Browser<H> {
    pub fn new(config: &Config, host: H) -> Self {
        let (telemetry, _) = broadcast::channel(TELEMETRY_CAPACITY);
        Self::with_telemetry(config, host, telemetry)
    }

    /// Build a browser that publishes routed telemetry on `telemetry`
    pub fn with_telemetry(
        config: &Config,
        host: H,
        telemetry: broadcast::Sender<RoutedTelemetry>,
    ) -> Self {
        Self {
            homepage: config.homepage.clone(),
            tabs: TabSet::new(),
            registry: BindingRegistry::new(host, config.geometry),
            geometry: GeometryReconciler::new(config.geometry),
            telemetry,
        }
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn registry(&self) -> &BindingRegistry<H> {
        &self.registry
    }

    pub fn subscribe_telemetry(&self) -> broadcast::Receiver<RoutedTelemetry> {
        self.telemetry.subscribe()
    }

    /// Open a tab on `url` (the homepage when absent) and make it active
    pub async fn create_tab(&mut self, url: Option<&str>) -> Result<String> {
        let url = match url {
            Some(input) => normalize_address(input)?,
            None => self.homepage.clone(),
        };

        let tab_id = self.tabs.open(url)?.id.clone();
        self.reconcile().await;

        Ok(tab_id)
    }

    /// Close a tab and its surface. The tab is gone even when the host
    /// fails to close the surface; that failure is still returned.
    pub async fn close_tab(&mut self, tab_id: &str) -> Result<()> {
        self.tabs.close(tab_id)?;

        let destroyed = self.registry.destroy(tab_id).await;
        self.reconcile().await;

        destroyed?;
        Ok(())
    }

    pub async fn select_tab(&mut self, tab_id: &str) -> Result<()> {
        self.tabs.select(tab_id)?;
        tracing::debug!(tab_id = %tab_id, "Selected tab");

        self.reconcile().await;
        Ok(())
    }

    pub async fn navigate(&mut self, tab_id: &str, input: &str) -> Result<()> {
        let url = normalize_address(input)?;
        self.tabs.get(tab_id)?;

        match self.registry.navigate(tab_id, &url).await {
            Ok(dispatch) => {
                let tab = self.tabs.get_mut(tab_id)?;
                tab.commit_navigation(&url);
                if dispatch == Dispatch::Issued {
                    tab.begin_navigation();
                }

                tracing::info!(tab_id = %tab_id, url = %url, ?dispatch, "Navigated tab");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, url = %url, "Navigation failed: {}", e);
                self.abandon_navigation(tab_id);
                Err(e.into())
            }
        }
    }

    pub async fn back(&mut self, tab_id: &str) -> Result<()> {
        if !self.tabs.get(tab_id)?.can_go_back() {
            return Err(NavigationError::CannotGoBack.into());
        }

        match self.registry.back(tab_id).await {
            Ok(dispatch) => {
                let tab = self.tabs.get_mut(tab_id)?;
                tab.step_back()?;
                if dispatch == Dispatch::Issued {
                    tab.begin_navigation();
                }

                tracing::debug!(tab_id = %tab_id, url = %tab.url(), "Stepped back");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, "Back navigation failed: {}", e);
                self.abandon_navigation(tab_id);
                Err(e.into())
            }
        }
    }

    pub async fn forward(&mut self, tab_id: &str) -> Result<()> {
        if !self.tabs.get(tab_id)?.can_go_forward() {
            return Err(NavigationError::CannotGoForward.into());
        }

        match self.registry.forward(tab_id).await {
            Ok(dispatch) => {
                let tab = self.tabs.get_mut(tab_id)?;
                tab.step_forward()?;
                if dispatch == Dispatch::Issued {
                    tab.begin_navigation();
                }

                tracing::debug!(tab_id = %tab_id, url = %tab.url(), "Stepped forward");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, "Forward navigation failed: {}", e);
                self.abandon_navigation(tab_id);
                Err(e.into())
            }
        }
    }

    pub async fn reload(&mut self, tab_id: &str) -> Result<()> {
        self.tabs.get(tab_id)?;

        match self.registry.reload(tab_id).await {
            Ok(Dispatch::Issued) => {
                self.tabs.get_mut(tab_id)?.begin_navigation();
                Ok(())
            }
            Ok(Dispatch::Deferred) => Ok(()),
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, "Reload failed: {}", e);
                self.abandon_navigation(tab_id);
                Err(e.into())
            }
        }
    }

    /// Apply one native event. Events for labels without a tab are dropped.
    pub fn handle_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Navigation(event) => self.on_navigation(event),
            InboundEvent::Title(event) => self.on_title(event),
            InboundEvent::Telemetry(event) => self.on_telemetry(event),
        }
    }

    fn on_navigation(&mut self, event: NavigationEvent) {
        let Some(tab) = self.tabs.find_by_label_mut(&event.webview_label) else {
            tracing::debug!(
                label = %event.webview_label,
                url = %event.new_url,
                "Discarding navigation event for unknown surface"
            );
            return;
        };

        tab.finish_navigation();
        tab.observe_navigation(&event.new_url, event.kind);
    }

    fn on_title(&mut self, event: TitleEvent) {
        match self.tabs.find_by_label_mut(&event.webview_label) {
            Some(tab) => {
                tab.set_title(&event.title);
            }
            None => {
                tracing::debug!(label = %event.webview_label, "Discarding title for unknown surface");
            }
        }
    }

    fn on_telemetry(&mut self, event: TelemetryEvent) {
        let Some(tab) = self.tabs.find_by_label(&event.webview_label) else {
            tracing::trace!(label = %event.webview_label, "Dropping telemetry for unknown surface");
            return;
        };

        // No subscribers is not an error
        let _ = self.telemetry.send(RoutedTelemetry {
            tab_id: tab.id.clone(),
            label: event.webview_label,
            payload: event.payload,
        });
    }

    /// Queue a container measurement for the next frame
    pub fn observe_container(&mut self, container: ContainerBox) {
        self.geometry.observe(container);
    }

    /// Whether a frame has work to do
    pub fn needs_frame(&self) -> bool {
        self.geometry.has_pending()
    }

    /// Apply the latest container measurement. Pending surfaces are retried
    /// on every frame until one can be created.
    pub async fn on_frame(&mut self) {
        let changed = self.geometry.take_frame().is_some();

        if changed || self.registry.has_pending() {
            self.reconcile().await;
        }
    }

    /// Bring native surfaces in line with the tab set
    pub async fn reconcile(&mut self) {
        let created = self
            .registry
            .reconcile(
                self.tabs.tabs(),
                self.tabs.active_id(),
                self.geometry.content(),
            )
            .await;

        // A new surface starts loading the tab's URL
        for tab_id in created {
            if let Ok(tab) = self.tabs.get_mut(&tab_id) {
                tab.begin_navigation();
            }
        }
    }

    pub fn snapshot(&self) -> BrowserSnapshot {
        let tabs: Vec<TabView> = self
            .tabs
            .tabs()
            .iter()
            .map(|tab| TabView::new(tab, self.registry.status(&tab.id)))
            .collect();

        let active = self.tabs.active();

        BrowserSnapshot {
            tabs,
            active_tab_id: active.map(|t| t.id.clone()),
            can_go_back: active.is_some_and(|t| t.can_go_back()),
            can_go_forward: active.is_some_and(|t| t.can_go_forward()),
        }
    }

    /// Close every surface
    pub async fn shutdown(&mut self) {
        tracing::info!(surfaces = self.registry.len(), "Closing all surfaces");
        self.registry.destroy_all().await;
    }

    fn abandon_navigation(&mut self, tab_id: &str) {
        if let Ok(tab) = self.tabs.get_mut(tab_id) {
            tab.finish_navigation();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::geometry::Bounds;
    use crate::host::SurfaceOp;
    use crate::registry::SurfaceStatus;
    use crate::testing::{FakeHost, HostCall};
    use brsr_navigation::NavigationKind;
    use brsr_tabs::TabError;
    use std::path::PathBuf;

    fn config() -> Config {
        Config::new(PathBuf::from("/tmp/brsr-test"))
    }

    fn container() -> ContainerBox {
        ContainerBox {
            x: 0.0,
            y: 48.0,
            width: 1280.0,
            height: 752.0,
            ..Default::default()
        }
    }

    /// Browser with a measured container
    async fn browser() -> (Browser<FakeHost>, FakeHost) {
        let host = FakeHost::new();
        let mut browser = Browser::new(&config(), host.clone());
        browser.observe_container(container());
        browser.on_frame().await;
        (browser, host)
    }

    fn label(browser: &Browser<FakeHost>, tab_id: &str) -> String {
        browser.tabs().get(tab_id).unwrap().webview_label.clone()
    }

    fn history(browser: &Browser<FakeHost>, tab_id: &str) -> (Vec<String>, usize) {
        let tab = browser.tabs().get(tab_id).unwrap();
        (tab.history().entries().to_vec(), tab.history_index())
    }

    fn nav(label: &str, url: &str) -> InboundEvent {
        NavigationEvent::new(label, url).into()
    }

    #[tokio::test]
    async fn test_create_tab_seeds_history() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://x.com")).await.unwrap();

        let snapshot = browser.snapshot();
        let view = snapshot.tab(&id).unwrap();
        assert_eq!(view.history, vec!["https://x.com".to_string()]);
        assert_eq!(view.history_index, 0);
        assert!(!view.can_go_back);
        assert!(!view.can_go_forward);
        assert_eq!(snapshot.active_tab_id.as_deref(), Some(id.as_str()));
        assert_eq!(view.surface, SurfaceStatus::Created);
        assert!(view.is_loading);

        let label = label(&browser, &id);
        assert_eq!(
            host.calls_for(&label),
            vec![
                HostCall::Create {
                    label: label.clone(),
                    url: "https://x.com".to_string(),
                    bounds: Bounds::new(0.0, 48.0, 1280.0, 752.0),
                },
                HostCall::Show(label.clone()),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_tab_defaults_to_homepage() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(None).await.unwrap();
        assert_eq!(browser.tabs().get(&id).unwrap().url(), "https://www.google.com");
    }

    #[tokio::test]
    async fn test_create_tab_rejects_blank_address() {
        let (mut browser, host) = browser().await;
        assert!(matches!(
            browser.create_tab(Some("   ")).await,
            Err(CoreError::Navigation(NavigationError::InvalidUrl(_)))
        ));
        assert!(browser.tabs().is_empty());
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_creation_waits_for_layout() {
        let host = FakeHost::new();
        let mut browser = Browser::new(&config(), host.clone());

        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        browser.navigate(&id, "https://b.com").await.unwrap();
        assert!(host.calls().is_empty());
        assert_eq!(browser.snapshot().tabs[0].surface, SurfaceStatus::Pending);

        browser.observe_container(ContainerBox {
            width: 0.0,
            ..container()
        });
        assert!(browser.needs_frame());
        browser.on_frame().await;
        assert!(host.calls().is_empty());

        browser.observe_container(container());
        browser.on_frame().await;

        let label = label(&browser, &id);
        assert_eq!(host.count(SurfaceOp::Create, &label), 1);
        assert!(matches!(
            &host.calls()[0],
            HostCall::Create { url, .. } if url == "https://b.com"
        ));
        assert!(!browser.needs_frame());
    }

    #[tokio::test]
    async fn test_sequential_navigations_append() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("https://u0.com")).await.unwrap();

        for n in 1..=4 {
            browser
                .navigate(&id, &format!("https://u{}.com", n))
                .await
                .unwrap();
        }

        let (entries, index) = history(&browser, &id);
        let expected: Vec<String> = (0..=4).map(|n| format!("https://u{}.com", n)).collect();
        assert_eq!(entries, expected);
        assert_eq!(index, 4);
    }

    #[tokio::test]
    async fn test_navigate_normalizes_address() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();

        browser.navigate(&id, "example.com").await.unwrap();

        let label = label(&browser, &id);
        assert!(host
            .calls_for(&label)
            .contains(&HostCall::Navigate(label.clone(), "https://example.com".to_string())));
        assert_eq!(browser.tabs().get(&id).unwrap().url(), "https://example.com");
    }

    #[tokio::test]
    async fn test_failed_navigation_leaves_tab_unchanged() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        host.fail(SurfaceOp::Navigate);

        let before = history(&browser, &id);
        assert!(matches!(
            browser.navigate(&id, "https://b.com").await,
            Err(CoreError::Surface(_))
        ));

        assert_eq!(history(&browser, &id), before);
        assert!(!browser.tabs().get(&id).unwrap().is_loading());
    }

    #[tokio::test]
    async fn test_back_then_forward_restores_position() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        browser.navigate(&id, "https://b.com").await.unwrap();
        browser.navigate(&id, "https://c.com").await.unwrap();

        let before = history(&browser, &id);
        browser.back(&id).await.unwrap();
        assert_eq!(browser.tabs().get(&id).unwrap().url(), "https://b.com");
        browser.forward(&id).await.unwrap();

        assert_eq!(history(&browser, &id), before);
        assert_eq!(browser.tabs().get(&id).unwrap().url(), "https://c.com");
    }

    #[tokio::test]
    async fn test_back_without_history_issues_nothing() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        host.clear();

        assert!(matches!(
            browser.back(&id).await,
            Err(CoreError::Navigation(NavigationError::CannotGoBack))
        ));
        assert!(matches!(
            browser.forward(&id).await,
            Err(CoreError::Navigation(NavigationError::CannotGoForward))
        ));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_back_keeps_cursor() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        browser.navigate(&id, "https://b.com").await.unwrap();
        host.fail(SurfaceOp::Back);

        assert!(browser.back(&id).await.is_err());
        assert_eq!(history(&browser, &id).1, 1);
    }

    #[tokio::test]
    async fn test_reload_keeps_history() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        let label = label(&browser, &id);
        browser.handle_event(nav(&label, "https://a.com"));

        let before = history(&browser, &id);
        browser.reload(&id).await.unwrap();

        assert_eq!(history(&browser, &id), before);
        assert_eq!(host.count(SurfaceOp::Reload, &label), 1);
        assert!(browser.tabs().get(&id).unwrap().is_loading());
    }

    #[tokio::test]
    async fn test_page_load_clears_loading() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        browser.navigate(&id, "https://b.com").await.unwrap();
        assert!(browser.tabs().get(&id).unwrap().is_loading());

        let label = label(&browser, &id);
        browser.handle_event(nav(&label, "https://b.com"));
        assert!(!browser.tabs().get(&id).unwrap().is_loading());
        assert_eq!(history(&browser, &id).0.len(), 2);
    }

    #[tokio::test]
    async fn test_close_active_selects_same_position() {
        let (mut browser, host) = browser().await;
        let a = browser.create_tab(Some("https://a.com")).await.unwrap();
        let b = browser.create_tab(Some("https://b.com")).await.unwrap();
        let c = browser.create_tab(Some("https://c.com")).await.unwrap();
        browser.select_tab(&b).await.unwrap();
        let closed = label(&browser, &b);

        browser.close_tab(&b).await.unwrap();

        assert_eq!(browser.tabs().active_id(), Some(c.as_str()));
        assert_eq!(browser.tabs().len(), 2);
        assert_eq!(host.count(SurfaceOp::Close, &closed), 1);

        browser.close_tab(&c).await.unwrap();
        assert_eq!(browser.tabs().active_id(), Some(a.as_str()));
    }

    #[tokio::test]
    async fn test_close_last_tab_clears_active() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        let label = label(&browser, &id);

        browser.close_tab(&id).await.unwrap();

        let snapshot = browser.snapshot();
        assert!(snapshot.tabs.is_empty());
        assert_eq!(snapshot.active_tab_id, None);
        assert_eq!(host.count(SurfaceOp::Close, &label), 1);
        assert!(browser.registry().is_empty());
    }

    #[tokio::test]
    async fn test_close_reports_host_failure_but_removes_tab() {
        let (mut browser, host) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        host.fail(SurfaceOp::Close);

        assert!(matches!(
            browser.close_tab(&id).await,
            Err(CoreError::Surface(_))
        ));
        assert!(browser.tabs().is_empty());
        assert!(browser.registry().is_empty());
    }

    #[tokio::test]
    async fn test_close_unknown_tab() {
        let (mut browser, _) = browser().await;
        assert!(matches!(
            browser.close_tab("tab-missing").await,
            Err(CoreError::Tab(TabError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_select_only_changes_active() {
        let (mut browser, host) = browser().await;
        let t1 = browser.create_tab(Some("https://a.com")).await.unwrap();
        browser.navigate(&t1, "https://a.com/2").await.unwrap();
        let t2 = browser.create_tab(Some("https://b.com")).await.unwrap();
        browser.select_tab(&t1).await.unwrap();

        let before = (history(&browser, &t1), history(&browser, &t2));
        host.clear();
        browser.select_tab(&t2).await.unwrap();

        assert_eq!((history(&browser, &t1), history(&browser, &t2)), before);
        assert_eq!(browser.tabs().active_id(), Some(t2.as_str()));
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Hide(label(&browser, &t1)),
                HostCall::Show(label(&browser, &t2)),
            ]
        );
    }

    #[tokio::test]
    async fn test_canonical_page_load_keeps_single_entry() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("https://x.com")).await.unwrap();
        browser.navigate(&id, "https://y.com").await.unwrap();
        let label = label(&browser, &id);

        let canonical = url::Url::parse("https://y.com").unwrap();
        browser.handle_event(nav(&label, canonical.as_str()));

        let view = browser.snapshot().tab(&id).cloned().unwrap();
        assert_eq!(
            view.history,
            vec!["https://x.com".to_string(), "https://y.com".to_string()]
        );
        assert_eq!(view.history_index, 1);
        assert!(!view.can_go_forward);
        assert!(!view.is_loading);

        // Back reported by the surface in canonical form is a replay
        browser.handle_event(nav(&label, url::Url::parse("https://x.com").unwrap().as_str()));
        let view = browser.snapshot().tab(&id).cloned().unwrap();
        assert_eq!(view.history.len(), 2);
        assert_eq!(view.history_index, 0);
        assert!(!view.can_go_back);
    }

    #[tokio::test]
    async fn test_event_one_step_back_is_replay() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("a")).await.unwrap();
        browser.navigate(&id, "b").await.unwrap();
        browser.navigate(&id, "c").await.unwrap();
        let label = label(&browser, &id);

        browser.handle_event(nav(&label, "https://b"));

        assert_eq!(
            history(&browser, &id),
            (
                vec![
                    "https://a".to_string(),
                    "https://b".to_string(),
                    "https://c".to_string()
                ],
                1
            )
        );
        assert_eq!(browser.tabs().get(&id).unwrap().url(), "https://b");
    }

    #[tokio::test]
    async fn test_event_for_new_url_truncates_forward_history() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("a")).await.unwrap();
        browser.navigate(&id, "b").await.unwrap();
        browser.navigate(&id, "c").await.unwrap();
        browser.back(&id).await.unwrap();
        let label = label(&browser, &id);

        browser.handle_event(nav(&label, "https://d"));

        assert_eq!(
            history(&browser, &id),
            (
                vec![
                    "https://a".to_string(),
                    "https://b".to_string(),
                    "https://d".to_string()
                ],
                2
            )
        );
    }

    #[tokio::test]
    async fn test_event_with_kind_overrides_proximity() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("a")).await.unwrap();
        for url in ["b", "c", "d"] {
            browser.navigate(&id, url).await.unwrap();
        }
        let label = label(&browser, &id);

        browser.handle_event(
            NavigationEvent::new(&label, "https://a")
                .with_kind(NavigationKind::BackForward)
                .into(),
        );

        let (entries, index) = history(&browser, &id);
        assert_eq!(entries.len(), 4);
        assert_eq!(index, 0);
    }

    #[tokio::test]
    async fn test_event_for_unknown_label_is_discarded() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        let label = label(&browser, &id);
        browser.close_tab(&id).await.unwrap();

        let before = browser.snapshot();
        browser.handle_event(nav(&label, "https://b.com"));
        browser.handle_event(
            TitleEvent {
                webview_label: label,
                title: "Late".to_string(),
            }
            .into(),
        );
        assert_eq!(browser.snapshot(), before);
    }

    #[tokio::test]
    async fn test_title_event_never_touches_history() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        let label = label(&browser, &id);
        let before = history(&browser, &id);

        browser.handle_event(
            TitleEvent {
                webview_label: label.clone(),
                title: "Example".to_string(),
            }
            .into(),
        );
        browser.handle_event(
            TitleEvent {
                webview_label: label,
                title: String::new(),
            }
            .into(),
        );

        let tab = browser.tabs().get(&id).unwrap();
        assert_eq!(tab.title, "Example");
        assert_eq!(history(&browser, &id), before);
    }

    #[tokio::test]
    async fn test_telemetry_is_routed_by_label() {
        let (mut browser, _) = browser().await;
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();
        let label = label(&browser, &id);
        let mut telemetry = browser.subscribe_telemetry();

        browser.handle_event(
            TelemetryEvent {
                webview_label: "webview-gone".to_string(),
                payload: serde_json::json!({ "kind": "console" }),
            }
            .into(),
        );
        browser.handle_event(
            TelemetryEvent {
                webview_label: label.clone(),
                payload: serde_json::json!({ "kind": "network" }),
            }
            .into(),
        );

        let routed = telemetry.recv().await.unwrap();
        assert_eq!(routed.tab_id, id);
        assert_eq!(routed.label, label);
        assert_eq!(routed.payload["kind"], "network");
        assert!(telemetry.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_surface_created_once_per_label() {
        let (mut browser, host) = browser().await;
        let a = browser.create_tab(Some("https://a.com")).await.unwrap();
        let b = browser.create_tab(Some("https://b.com")).await.unwrap();

        for (i, id) in [&a, &b, &a, &b].into_iter().enumerate() {
            browser.select_tab(id).await.unwrap();
            browser.observe_container(ContainerBox {
                width: 900.0 + i as f64 * 10.0,
                ..container()
            });
            browser.on_frame().await;
            browser.navigate(id, &format!("https://{}.com", i)).await.unwrap();
        }

        assert_eq!(host.count(SurfaceOp::Create, &label(&browser, &a)), 1);
        assert_eq!(host.count(SurfaceOp::Create, &label(&browser, &b)), 1);
    }

    #[tokio::test]
    async fn test_only_active_surface_receives_bounds() {
        let (mut browser, host) = browser().await;
        let a = browser.create_tab(Some("https://a.com")).await.unwrap();
        let b = browser.create_tab(Some("https://b.com")).await.unwrap();
        host.clear();

        browser.observe_container(ContainerBox {
            height: 900.0,
            ..container()
        });
        browser.on_frame().await;

        assert_eq!(host.count(SurfaceOp::UpdateBounds, &label(&browser, &a)), 0);
        assert_eq!(
            host.calls(),
            vec![HostCall::UpdateBounds(
                label(&browser, &b),
                Bounds::new(0.0, 48.0, 1280.0, 900.0)
            )]
        );
    }

    #[tokio::test]
    async fn test_failed_surface_reports_unavailable() {
        let (mut browser, host) = browser().await;
        host.fail(SurfaceOp::Create);
        let id = browser.create_tab(Some("https://a.com")).await.unwrap();

        assert_eq!(browser.snapshot().tabs[0].surface, SurfaceStatus::Failed);
        assert!(matches!(
            browser.navigate(&id, "https://b.com").await,
            Err(CoreError::Surface(_))
        ));
        assert!(!browser.tabs().get(&id).unwrap().is_loading());
    }

    #[tokio::test]
    async fn test_shutdown_closes_every_surface() {
        let (mut browser, host) = browser().await;
        let a = browser.create_tab(Some("https://a.com")).await.unwrap();
        let b = browser.create_tab(Some("https://b.com")).await.unwrap();

        browser.shutdown().await;

        assert_eq!(host.count(SurfaceOp::Close, &label(&browser, &a)), 1);
        assert_eq!(host.count(SurfaceOp::Close, &label(&browser, &b)), 1);
        assert!(browser.registry().is_empty());
    }
}
