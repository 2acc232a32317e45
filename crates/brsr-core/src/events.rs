//! Events reported by the native layer
//!
//! Every event names the surface it came from by label. Events arrive
//! asynchronously and are attributed to a tab only when they are drained
//! from the shell queue, so a tab may be gone by then.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brsr_navigation::NavigationKind;

/// A surface finished loading `new_url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub webview_label: String,
    pub new_url: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Navigation type, when the host can tell
    #[serde(default)]
    pub kind: Option<NavigationKind>,
}

impl NavigationEvent {
    pub fn new(webview_label: impl Into<String>, new_url: impl Into<String>) -> Self {
        Self {
            webview_label: webview_label.into(),
            new_url: new_url.into(),
            timestamp: Utc::now(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: NavigationKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleEvent {
    pub webview_label: String,
    pub title: String,
}

/// Page metadata, console, network or error report from a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub webview_label: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    Navigation(NavigationEvent),
    Title(TitleEvent),
    Telemetry(TelemetryEvent),
}

impl From<NavigationEvent> for InboundEvent {
    fn from(event: NavigationEvent) -> Self {
        InboundEvent::Navigation(event)
    }
}

impl From<TitleEvent> for InboundEvent {
    fn from(event: TitleEvent) -> Self {
        InboundEvent::Title(event)
    }
}

impl From<TelemetryEvent> for InboundEvent {
    fn from(event: TelemetryEvent) -> Self {
        InboundEvent::Telemetry(event)
    }
}

/// Telemetry attributed to the tab that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedTelemetry {
    pub tab_id: String,
    pub label: String,
    pub payload: serde_json::Value,
}
