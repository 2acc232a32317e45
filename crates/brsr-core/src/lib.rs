//! BRSR Core
//!
//! Orchestration layer of the browser shell. Tabs are logical records bound
//! to native webview surfaces; this crate keeps the tab set, the surface
//! bindings, their placement and every tab's history consistent while user
//! commands and native navigation reports arrive interleaved.
//!
//! All mutation happens on one [`ShellRuntime`] task that drains a single
//! queue fed by [`ShellHandle`] (user commands) and the native host
//! (navigation, title and telemetry events).

mod browser;
mod config;
mod error;
mod events;
mod geometry;
mod host;
mod preferences;
mod registry;
mod runtime;
mod snapshot;

#[cfg(test)]
mod testing;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;
pub use events::{InboundEvent, NavigationEvent, RoutedTelemetry, TelemetryEvent, TitleEvent};
pub use geometry::{Bounds, ContainerBox, Edges, GeometryConfig, GeometryReconciler, Offset};
pub use host::{SurfaceError, SurfaceHost, SurfaceOp, SurfaceResult};
pub use preferences::{Preferences, ThemeChoice, DISMISSED_UPDATE_KEY, THEME_KEY};
pub use registry::{Binding, BindingRegistry, Creation, Dispatch, SurfaceStatus};
pub use runtime::{shell_channel, Inbox, ShellHandle, ShellRuntime};
pub use snapshot::{BrowserSnapshot, TabView};

pub use brsr_navigation::{normalize_address, HistoryLog, NavigationError, NavigationKind};
pub use brsr_storage::{Database, StorageError};
pub use brsr_tabs::{NavState, Tab, TabError, TabSet};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
