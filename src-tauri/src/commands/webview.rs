//! Reports from webviews
//!
//! The UI webview measures the content container and reports it here; tab
//! surfaces report telemetry through their initialization script.

use brsr_core::{ContainerBox, TelemetryEvent};
use tauri::{State, Webview};

use super::tabs::CommandResult;
use crate::state::AppState;

/// Border box of the content container, with border and padding widths
#[tauri::command]
pub fn report_content_box(state: State<AppState>, container: ContainerBox) -> CommandResult<()> {
    state.shell.observe_container(container);
    CommandResult::ok(())
}

#[tauri::command]
pub fn report_telemetry(
    webview: Webview,
    state: State<AppState>,
    payload: serde_json::Value,
) -> CommandResult<()> {
    state.shell.notify(TelemetryEvent {
        webview_label: webview.label().to_string(),
        payload,
    });
    CommandResult::ok(())
}
