//! Tauri IPC Commands
//!
//! These commands bridge the UI webview to the shell runtime. Tab and
//! navigation commands are queued to the runtime and answered once applied.

pub mod diagnostics;
pub mod navigation;
pub mod settings;
pub mod system;
pub mod tabs;
pub mod webview;

pub fn ui_webview_label(window_label: &str) -> String {
    format!("ui-{window_label}")
}
