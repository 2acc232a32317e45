//! Tab management commands
use brsr_core::BrowserSnapshot;
use serde::Serialize;
use tauri::{AppHandle, Manager, State};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T> From<brsr_core::Result<T>> for CommandResult<T> {
    fn from(result: brsr_core::Result<T>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(e.to_string()),
        }
    }
}

/// Open a tab on `url`, or on the homepage when none is given
#[tauri::command]
pub async fn create_tab(app: AppHandle, url: Option<String>) -> CommandResult<String> {
    let shell = app.state::<AppState>().shell();
    shell.create_tab(url).await.into()
}

#[tauri::command]
pub async fn close_tab(app: AppHandle, tab_id: String) -> CommandResult<()> {
    let shell = app.state::<AppState>().shell();
    shell.close_tab(tab_id).await.into()
}

#[tauri::command]
pub async fn select_tab(app: AppHandle, tab_id: String) -> CommandResult<()> {
    let shell = app.state::<AppState>().shell();
    shell.select_tab(tab_id).await.into()
}

#[tauri::command]
pub fn get_browser_state(state: State<AppState>) -> CommandResult<BrowserSnapshot> {
    CommandResult::ok(state.shell.snapshot())
}
