//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No earlier history entry")]
    CannotGoBack,

    #[error("No later history entry")]
    CannotGoForward,
}
