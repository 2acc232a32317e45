//! Navigation commands
//!
//! A rejected command leaves the tab on its last committed URL; the error
//! is returned so the UI can show feedback.

use tauri::{AppHandle, Manager};

use super::tabs::CommandResult;
use crate::state::AppState;

#[tauri::command]
pub async fn navigate_tab(app: AppHandle, tab_id: String, url: String) -> CommandResult<()> {
    let shell = app.state::<AppState>().shell();
    shell.navigate(tab_id, url).await.into()
}

#[tauri::command]
pub async fn go_back(app: AppHandle, tab_id: String) -> CommandResult<()> {
    let shell = app.state::<AppState>().shell();
    shell.back(tab_id).await.into()
}

#[tauri::command]
pub async fn go_forward(app: AppHandle, tab_id: String) -> CommandResult<()> {
    let shell = app.state::<AppState>().shell();
    shell.forward(tab_id).await.into()
}

#[tauri::command]
pub async fn reload_tab(app: AppHandle, tab_id: String) -> CommandResult<()> {
    let shell = app.state::<AppState>().shell();
    shell.reload(tab_id).await.into()
}
