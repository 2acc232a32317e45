//! Native surfaces as Tauri child webviews
//!
//! Every tab surface is a child webview of the main window, addressed by
//! the tab's webview label. Page loads and title changes are reported back
//! to the shell queue; the shell decides what they mean.

use async_trait::async_trait;
use brsr_core::{
    Bounds, NavigationEvent, ShellHandle, SurfaceError, SurfaceHost, SurfaceOp, SurfaceResult,
    TitleEvent,
};
use tauri::webview::{PageLoadEvent, WebviewBuilder};
use tauri::{AppHandle, LogicalPosition, LogicalSize, Manager, Webview, WebviewUrl};

/// Reports uncaught errors and page metadata back to the shell
const TELEMETRY_INIT_SCRIPT: &str = r#"
(() => {
  try {
    const report = (payload) => {
      try {
        window.__TAURI_INTERNALS__?.invoke('report_telemetry', { payload });
      } catch {}
    };
    window.addEventListener('error', (e) => {
      report({ kind: 'error', message: String(e.message || ''), source: String(e.filename || '') });
    });
    window.addEventListener('unhandledrejection', (e) => {
      report({ kind: 'error', message: String(e.reason || '') });
    });
    window.addEventListener('load', () => {
      const icon = document.querySelector('link[rel~="icon"]');
      report({
        kind: 'page',
        url: location.href,
        title: document.title,
        favicon: icon ? icon.href : null,
      });
    });
  } catch {}
})();
"#;

#[derive(Clone)]
pub struct TauriSurfaceHost {
    app: AppHandle,
    window_label: String,
    shell: ShellHandle,
}

impl TauriSurfaceHost {
    pub fn new(app: AppHandle, window_label: &str, shell: ShellHandle) -> Self {
        Self {
            app,
            window_label: window_label.to_string(),
            shell,
        }
    }

    fn webview(&self, label: &str) -> SurfaceResult<Webview> {
        self.app
            .get_webview(label)
            .ok_or_else(|| SurfaceError::NotFound(label.to_string()))
    }

    fn parse(url: &str) -> SurfaceResult<url::Url> {
        url.parse::<url::Url>()
            .map_err(|_| SurfaceError::InvalidUrl(url.to_string()))
    }
}

#[async_trait]
impl SurfaceHost for TauriSurfaceHost {
    async fn create_surface(&self, label: &str, url: &str, bounds: Bounds) -> SurfaceResult<()> {
        let window = self
            .app
            .get_window(&self.window_label)
            .ok_or_else(|| SurfaceError::NotFound(self.window_label.clone()))?;

        let webview_url = WebviewUrl::External(Self::parse(url)?);

        let shell_for_load = self.shell.clone();
        let shell_for_title = self.shell.clone();
        let label_for_load = label.to_string();
        let label_for_title = label.to_string();

        let builder = WebviewBuilder::new(label, webview_url)
            .transparent(false)
            .enable_clipboard_access()
            .initialization_script(TELEMETRY_INIT_SCRIPT)
            .on_page_load(move |_webview, payload| {
                if let PageLoadEvent::Finished = payload.event() {
                    shell_for_load.notify(NavigationEvent::new(
                        label_for_load.as_str(),
                        payload.url().as_str(),
                    ));
                }
            })
            .on_document_title_changed(move |_webview, title| {
                shell_for_title.notify(TitleEvent {
                    webview_label: label_for_title.clone(),
                    title,
                });
            });

        window
            .add_child(
                builder,
                LogicalPosition::new(bounds.x, bounds.y),
                LogicalSize::new(bounds.width, bounds.height),
            )
            .map_err(|e| SurfaceError::command(SurfaceOp::Create, label, e))?;

        Ok(())
    }

    async fn show_surface(&self, label: &str) -> SurfaceResult<()> {
        self.webview(label)?
            .show()
            .map_err(|e| SurfaceError::command(SurfaceOp::Show, label, e))
    }

    async fn hide_surface(&self, label: &str) -> SurfaceResult<()> {
        self.webview(label)?
            .hide()
            .map_err(|e| SurfaceError::command(SurfaceOp::Hide, label, e))
    }

    async fn update_surface_bounds(&self, label: &str, bounds: Bounds) -> SurfaceResult<()> {
        let webview = self.webview(label)?;

        // Position is relative to the parent window
        webview
            .set_position(LogicalPosition::new(bounds.x, bounds.y))
            .map_err(|e| SurfaceError::command(SurfaceOp::UpdateBounds, label, e))?;
        webview
            .set_size(LogicalSize::new(bounds.width, bounds.height))
            .map_err(|e| SurfaceError::command(SurfaceOp::UpdateBounds, label, e))
    }

    async fn close_surface(&self, label: &str) -> SurfaceResult<()> {
        self.webview(label)?
            .close()
            .map_err(|e| SurfaceError::command(SurfaceOp::Close, label, e))
    }

    async fn navigate(&self, label: &str, url: &str) -> SurfaceResult<()> {
        let parsed = Self::parse(url)?;
        self.webview(label)?
            .navigate(parsed)
            .map_err(|e| SurfaceError::command(SurfaceOp::Navigate, label, e))
    }

    async fn navigate_back(&self, label: &str) -> SurfaceResult<()> {
        self.webview(label)?
            .eval("history.back()")
            .map_err(|e| SurfaceError::command(SurfaceOp::Back, label, e))
    }

    async fn navigate_forward(&self, label: &str) -> SurfaceResult<()> {
        self.webview(label)?
            .eval("history.forward()")
            .map_err(|e| SurfaceError::command(SurfaceOp::Forward, label, e))
    }

    async fn reload(&self, label: &str) -> SurfaceResult<()> {
        self.webview(label)?
            .reload()
            .map_err(|e| SurfaceError::command(SurfaceOp::Reload, label, e))
    }
}
