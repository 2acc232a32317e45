use brsr_core::BrowserSnapshot;
use tauri::State;

use super::tabs::CommandResult;
use crate::state::AppState;

/// The UI finished loading; hand it the current state so it can render
/// before the next change is pushed
#[tauri::command]
pub fn frontend_ready(state: State<AppState>) -> CommandResult<BrowserSnapshot> {
    tracing::info!("Frontend ready");
    CommandResult::ok(state.shell.snapshot())
}
