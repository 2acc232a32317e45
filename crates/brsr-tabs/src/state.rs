//! Per-tab navigation state
//!
//! ```text
//! Idle
//!   ↓ navigate / back / forward / reload issued
//! Navigating
//!   ↓ page load reported, or the native command failed
//! Idle
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavState {
    #[default]
    Idle,
    /// A native load is in flight for this tab
    Navigating,
}

impl NavState {
    pub fn is_navigating(&self) -> bool {
        matches!(self, NavState::Navigating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavState::Idle => "idle",
            NavState::Navigating => "navigating",
        }
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
