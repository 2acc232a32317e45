//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] brsr_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] brsr_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] brsr_navigation::NavigationError),

    #[error("Native surface error: {0}")]
    Surface(#[from] crate::host::SurfaceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Shell runtime is not running")]
    ShellClosed,
}
