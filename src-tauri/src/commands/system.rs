//! Default browser registration
//!
//! Linux desktops are queried and updated through `xdg-settings`. Other
//! platforms only let the user pick the default browser themselves, so
//! the OS settings page is opened instead.

#[cfg(target_os = "linux")]
use tauri::Manager;
use tauri::{AppHandle, State};

use super::tabs::CommandResult;
use crate::state::AppState;

#[cfg(target_os = "linux")]
async fn xdg_settings(args: &[&str]) -> Result<String, String> {
    let output = tokio::process::Command::new("xdg-settings")
        .args(args)
        .output()
        .await
        .map_err(|e| format!("Failed to run xdg-settings: {}", e))?;

    if !output.status.success() {
        return Err(String::from_utf8_lossy(&output.stderr).trim().to_string());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(target_os = "linux")]
fn desktop_entry(app_id: &str) -> String {
    format!("{}.desktop", app_id)
}

#[cfg(target_os = "linux")]
#[tauri::command]
pub async fn is_default_browser(app: AppHandle) -> CommandResult<bool> {
    let entry = desktop_entry(&app.state::<AppState>().config.app_id);

    match xdg_settings(&["check", "default-web-browser", &entry]).await {
        Ok(answer) => CommandResult::ok(answer == "yes"),
        Err(e) => CommandResult::err(e),
    }
}

#[cfg(not(target_os = "linux"))]
#[tauri::command]
pub async fn is_default_browser(_app: AppHandle) -> CommandResult<bool> {
    CommandResult::err("Default browser check is not supported on this platform".to_string())
}

#[cfg(target_os = "linux")]
#[tauri::command]
pub async fn set_default_browser(app: AppHandle) -> CommandResult<()> {
    let entry = desktop_entry(&app.state::<AppState>().config.app_id);

    match xdg_settings(&["set", "default-web-browser", &entry]).await {
        Ok(_) => {
            tracing::info!(entry = %entry, "Registered as default browser");
            CommandResult::ok(())
        }
        Err(e) => {
            tracing::warn!(entry = %entry, "Failed to register as default browser: {}", e);
            CommandResult::err(e)
        }
    }
}

#[cfg(not(target_os = "linux"))]
#[tauri::command]
pub async fn set_default_browser(app: AppHandle) -> CommandResult<()> {
    use tauri_plugin_opener::OpenerExt;

    #[cfg(target_os = "macos")]
    const SETTINGS_URL: &str = "x-apple.systempreferences:com.apple.Desktop-Settings.extension";
    #[cfg(not(target_os = "macos"))]
    const SETTINGS_URL: &str = "ms-settings:defaultapps";

    match app.opener().open_url(SETTINGS_URL, None::<&str>) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Identifier registered with the OS
#[tauri::command]
pub fn get_app_id(state: State<AppState>) -> CommandResult<String> {
    CommandResult::ok(state.config.app_id.clone())
}
