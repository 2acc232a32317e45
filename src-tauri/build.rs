/// App commands guarded by capabilities. Remote tab surfaces are granted
/// `report_telemetry` only; everything else belongs to the UI webview.
const COMMANDS: &[&str] = &[
    "frontend_ready",
    "create_tab",
    "close_tab",
    "select_tab",
    "get_browser_state",
    "navigate_tab",
    "go_back",
    "go_forward",
    "reload_tab",
    "report_content_box",
    "report_telemetry",
    "get_settings",
    "set_theme",
    "dismiss_update",
    "is_update_dismissed",
    "is_default_browser",
    "set_default_browser",
    "get_app_id",
];

fn main() {
    tauri_build::try_build(
        tauri_build::Attributes::new()
            .app_manifest(tauri_build::AppManifest::new().commands(COMMANDS)),
    )
    .expect("failed to run tauri-build");
}
