//! User preferences kept outside the tab state
//!
//! Only the theme and the last dismissed update version are stored. Both
//! live in the settings table under fixed keys.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use brsr_storage::Database;

use crate::config::Config;
use crate::Result;

pub const THEME_KEY: &str = "theme-preference";
pub const DISMISSED_UPDATE_KEY: &str = "dismissed-update-version";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeChoice::System => "system",
            ThemeChoice::Light => "light",
            ThemeChoice::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "system" => Ok(ThemeChoice::System),
            "light" => Ok(ThemeChoice::Light),
            "dark" => Ok(ThemeChoice::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

#[derive(Clone)]
pub struct Preferences {
    db: Database,
}

impl Preferences {
    pub fn open(config: &Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        tracing::info!(path = %config.database_path.display(), "Opened settings database");

        Ok(Self { db })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    /// Stored theme; unreadable values fall back to the system theme
    pub fn theme(&self) -> Result<ThemeChoice> {
        let stored = self.db.get_setting(THEME_KEY)?;

        Ok(match stored {
            Some(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!(value = %value, "Ignoring stored theme: {}", e);
                ThemeChoice::System
            }),
            None => ThemeChoice::System,
        })
    }

    pub fn set_theme(&self, theme: ThemeChoice) -> Result<()> {
        self.db.set_setting(THEME_KEY, theme.as_str())?;
        tracing::debug!(theme = %theme, "Saved theme preference");
        Ok(())
    }

    pub fn dismissed_update_version(&self) -> Result<Option<String>> {
        Ok(self.db.get_setting(DISMISSED_UPDATE_KEY)?)
    }

    pub fn dismiss_update(&self, version: &str) -> Result<()> {
        self.db.set_setting(DISMISSED_UPDATE_KEY, version)?;
        Ok(())
    }

    pub fn is_update_dismissed(&self, version: &str) -> Result<bool> {
        Ok(self.dismissed_update_version()?.as_deref() == Some(version))
    }
}
