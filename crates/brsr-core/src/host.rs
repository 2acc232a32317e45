//! Native surface command interface
//!
//! The shell never renders anything itself. Surfaces are created, shown,
//! hidden, moved, navigated and closed through a [`SurfaceHost`]. Every
//! call may fail; callers treat a failure as final for that command.

use async_trait::async_trait;
use thiserror::Error;

use crate::geometry::Bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceOp {
    Create,
    Show,
    Hide,
    UpdateBounds,
    Close,
    Navigate,
    Back,
    Forward,
    Reload,
}

impl SurfaceOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceOp::Create => "create",
            SurfaceOp::Show => "show",
            SurfaceOp::Hide => "hide",
            SurfaceOp::UpdateBounds => "update bounds",
            SurfaceOp::Close => "close",
            SurfaceOp::Navigate => "navigate",
            SurfaceOp::Back => "navigate back",
            SurfaceOp::Forward => "navigate forward",
            SurfaceOp::Reload => "reload",
        }
    }
}

impl std::fmt::Display for SurfaceOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Surface not found: {0}")]
    NotFound(String),

    #[error("Surface {label}: {op} failed: {message}")]
    Command {
        op: SurfaceOp,
        label: String,
        message: String,
    },

    #[error("Surface for tab {0} could not be created")]
    Unavailable(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl SurfaceError {
    pub fn command(op: SurfaceOp, label: &str, error: impl std::fmt::Display) -> Self {
        SurfaceError::Command {
            op,
            label: label.to_string(),
            message: error.to_string(),
        }
    }
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Commands the shell issues to the native webview host.
///
/// Commands for one label are awaited one at a time, so a host that
/// executes them in call order preserves issuance order per surface.
#[async_trait]
pub trait SurfaceHost: Send + Sync + 'static {
    async fn create_surface(&self, label: &str, url: &str, bounds: Bounds) -> SurfaceResult<()>;

    async fn show_surface(&self, label: &str) -> SurfaceResult<()>;

    async fn hide_surface(&self, label: &str) -> SurfaceResult<()>;

    async fn update_surface_bounds(&self, label: &str, bounds: Bounds) -> SurfaceResult<()>;

    async fn close_surface(&self, label: &str) -> SurfaceResult<()>;

    async fn navigate(&self, label: &str, url: &str) -> SurfaceResult<()>;

    async fn navigate_back(&self, label: &str) -> SurfaceResult<()>;

    async fn navigate_forward(&self, label: &str) -> SurfaceResult<()>;

    async fn reload(&self, label: &str) -> SurfaceResult<()>;
}
