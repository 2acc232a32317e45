//! BRSR Browser - Tauri Application
//!
//! The main window hosts the UI webview (tab strip, top bar) and one child
//! webview per tab. The shell runtime owns every tab and surface; this crate
//! wires it to Tauri: surfaces, IPC commands and events pushed to the UI.

mod commands;
mod host;
mod state;

use brsr_core::{shell_channel, Config, Preferences, ShellHandle, ShellRuntime};
use host::TauriSurfaceHost;
use state::AppState;
use tauri::webview::WebviewBuilder;
use tauri::window::WindowBuilder;
use tauri::{
    AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, RunEvent, WebviewUrl, WindowEvent,
};
use tokio::sync::broadcast::error::RecvError;

/// URLs passed on the command line
fn startup_urls() -> Vec<String> {
    std::env::args()
        .skip(1)
        .filter(|arg| !arg.starts_with('-'))
        .collect()
}

/// Open one tab per URL, or a homepage tab when there are none
fn open_initial_tabs(shell: ShellHandle, urls: Vec<String>) {
    tauri::async_runtime::spawn(async move {
        if urls.is_empty() {
            if let Err(e) = shell.create_tab(None).await {
                tracing::error!("Failed to open initial tab: {}", e);
            }
            return;
        }

        for url in urls {
            open_external(&shell, url).await;
        }
    });
}

async fn open_external(shell: &ShellHandle, url: String) {
    tracing::info!(url = %url, "Opening external URL");
    if let Err(e) = shell.create_tab(Some(url.clone())).await {
        tracing::warn!(url = %url, "Failed to open external URL: {}", e);
    }
}

/// Push every published snapshot to the UI webview
fn forward_snapshots(app: AppHandle, ui_label: String, shell: &ShellHandle) {
    let mut snapshots = shell.subscribe();

    tauri::async_runtime::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            if let Err(e) = app.emit_to(ui_label.as_str(), "browser-state-changed", snapshot) {
                tracing::warn!("Failed to emit browser state: {}", e);
            }
        }
    });
}

/// Push telemetry attributed to tabs to the UI webview
fn forward_telemetry(app: AppHandle, ui_label: String, shell: &ShellHandle) {
    let mut telemetry = shell.subscribe_telemetry();

    tauri::async_runtime::spawn(async move {
        loop {
            match telemetry.recv().await {
                Ok(event) => {
                    let _ = app.emit_to(ui_label.as_str(), "webview-telemetry", event);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Telemetry forwarder lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    brsr_core::init_logging();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config = app
                .path()
                .app_local_data_dir()
                .map(Config::new)
                .unwrap_or_default();
            let preferences = Preferences::open(&config)?;
            let initial_theme = preferences.theme().unwrap_or_default();

            let window_label = "main";

            let window = WindowBuilder::new(app, window_label)
                .title("BRSR")
                .inner_size(1280.0, 800.0)
                .min_inner_size(800.0, 600.0)
                .center()
                .build()?;

            let platform_theme = commands::settings::platform_theme_for(initial_theme);
            app.handle().set_theme(platform_theme);
            let _ = window.set_theme(platform_theme);

            let ui_label = commands::ui_webview_label(window_label);
            let ui_webview = WebviewBuilder::new(&ui_label, WebviewUrl::App("index.html".into()))
                .auto_resize()
                .enable_clipboard_access();

            let ui_webview = window.add_child(
                ui_webview,
                LogicalPosition::new(0.0, 0.0),
                LogicalSize::new(1280.0, 800.0),
            )?;
            let _ = ui_webview.show();

            // Shell runtime with Tauri child webviews as surfaces
            let (shell, inbox) = shell_channel();
            let host = TauriSurfaceHost::new(app.handle().clone(), window_label, shell.clone());
            tauri::async_runtime::spawn(ShellRuntime::new(&config, host, inbox).run());

            forward_snapshots(app.handle().clone(), ui_label.clone(), &shell);
            forward_telemetry(app.handle().clone(), ui_label.clone(), &shell);

            // The UI re-measures the content container and reports it back
            let app_for_resize = app.handle().clone();
            window.on_window_event(move |event| {
                if let WindowEvent::Resized(_) = event {
                    let _ = app_for_resize.emit_to(ui_label.as_str(), "content-box-requested", ());
                }
            });

            open_initial_tabs(shell.clone(), startup_urls());

            app.manage(AppState::new(config, shell, preferences));

            tracing::info!("BRSR Browser started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Diagnostics
            commands::diagnostics::frontend_ready,
            // Tab commands
            commands::tabs::create_tab,
            commands::tabs::close_tab,
            commands::tabs::select_tab,
            commands::tabs::get_browser_state,
            // Navigation commands
            commands::navigation::navigate_tab,
            commands::navigation::go_back,
            commands::navigation::go_forward,
            commands::navigation::reload_tab,
            // Webview reports
            commands::webview::report_content_box,
            commands::webview::report_telemetry,
            // Settings commands
            commands::settings::get_settings,
            commands::settings::set_theme,
            commands::settings::dismiss_update,
            commands::settings::is_update_dismissed,
            // System integration
            commands::system::is_default_browser,
            commands::system::set_default_browser,
            commands::system::get_app_id,
        ])
        .build(tauri::generate_context!())
        .expect("error while building BRSR browser");

    app.run(|app, event| match event {
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        RunEvent::Opened { urls } => {
            let shell = app.state::<AppState>().shell();
            tauri::async_runtime::spawn(async move {
                for url in urls {
                    open_external(&shell, url.to_string()).await;
                }
            });
        }
        RunEvent::ExitRequested { api, code, .. } => {
            let Some(state) = app.try_state::<AppState>() else {
                return;
            };
            if state.shell.is_closed() {
                return;
            }

            // Close every surface before the process goes away
            api.prevent_exit();
            let shell = state.shell();
            let app = app.clone();
            tauri::async_runtime::spawn(async move {
                shell.shutdown().await;
                app.exit(code.unwrap_or(0));
            });
        }
        _ => {}
    });
}
