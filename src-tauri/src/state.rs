//! Application state management
use brsr_core::{Config, Preferences, ShellHandle};

/// Handles shared with IPC commands. The browser itself lives on the shell
/// runtime task; commands reach it through the shell queue.
pub struct AppState {
    pub config: Config,
    pub shell: ShellHandle,
    pub preferences: Preferences,
}

impl AppState {
    pub fn new(config: Config, shell: ShellHandle, preferences: Preferences) -> Self {
        Self {
            config,
            shell,
            preferences,
        }
    }

    pub fn shell(&self) -> ShellHandle {
        self.shell.clone()
    }
}
