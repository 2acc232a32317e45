//! Settings commands

use brsr_core::ThemeChoice;
use serde::Serialize;
use tauri::{AppHandle, State, Theme, Window};

use super::tabs::CommandResult;
use crate::state::AppState;

pub(crate) fn platform_theme_for(theme: ThemeChoice) -> Option<Theme> {
    // On Windows, the native title bar theme appears inverted relative to the requested theme.
    // Swap it so the window chrome matches the app theme.
    #[cfg(windows)]
    {
        match theme {
            ThemeChoice::Dark => Some(Theme::Light),
            ThemeChoice::Light => Some(Theme::Dark),
            ThemeChoice::System => None,
        }
    }

    #[cfg(not(windows))]
    {
        match theme {
            ThemeChoice::Dark => Some(Theme::Dark),
            ThemeChoice::Light => Some(Theme::Light),
            ThemeChoice::System => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsInfo {
    pub theme: ThemeChoice,
    pub dismissed_update_version: Option<String>,
    pub homepage: String,
}

#[tauri::command]
pub fn get_settings(state: State<AppState>) -> CommandResult<SettingsInfo> {
    let theme = match state.preferences.theme() {
        Ok(theme) => theme,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    match state.preferences.dismissed_update_version() {
        Ok(dismissed_update_version) => CommandResult::ok(SettingsInfo {
            theme,
            dismissed_update_version,
            homepage: state.config.homepage.clone(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn set_theme(
    app: AppHandle,
    window: Window,
    state: State<AppState>,
    theme: String,
) -> CommandResult<()> {
    let theme = match theme.to_lowercase().parse::<ThemeChoice>() {
        Ok(theme) => theme,
        Err(e) => return CommandResult::err(e),
    };

    let platform_theme = platform_theme_for(theme);
    app.set_theme(platform_theme);
    let _ = window.set_theme(platform_theme);

    state.preferences.set_theme(theme).into()
}

#[tauri::command]
pub fn dismiss_update(state: State<AppState>, version: String) -> CommandResult<()> {
    state.preferences.dismiss_update(&version).into()
}

#[tauri::command]
pub fn is_update_dismissed(state: State<AppState>, version: String) -> CommandResult<bool> {
    state.preferences.is_update_dismissed(&version).into()
}
