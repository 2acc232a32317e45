//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Navigation error: {0}")]
    Navigation(#[from] brsr_navigation::NavigationError),
}
