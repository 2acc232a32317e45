//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::geometry::GeometryConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the settings database
    pub database_path: PathBuf,
    /// URL loaded by tabs opened without one
    pub homepage: String,
    /// Identifier registered with the OS as the default browser
    pub app_id: String,
    /// Surface placement rules
    pub geometry: GeometryConfig,
    /// Length of one layout frame in milliseconds
    pub frame_interval_ms: u64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("brsr.db"),
            homepage: "https://www.google.com".to_string(),
            app_id: "com.brsr.browser".to_string(),
            geometry: GeometryConfig::default(),
            frame_interval_ms: 16,
        }
    }

    /// Per-user data directory, used when the host does not provide one
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("brsr"))
            .unwrap_or_else(|| PathBuf::from(".brsr"))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
